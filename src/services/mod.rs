pub mod widget_service;
