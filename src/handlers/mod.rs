pub mod widget_handlers;
