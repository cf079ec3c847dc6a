use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Widget {
    pub id: u32,
    pub name: String,
    pub owner: Option<String>,
}

#[derive(Clone, Default)]
pub struct WidgetService {
    widgets: Arc<RwLock<BTreeMap<u32, Widget>>>,
}

impl WidgetService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seeded() -> Self {
        let service = Self::new();
        service.add_widget("sprocket", Some("ops")).await;
        service.add_widget("flange", None).await;
        service
    }

    pub async fn add_widget(&self, name: &str, owner: Option<&str>) -> Widget {
        let mut widgets = self.widgets.write().await;
        let id = widgets.keys().next_back().map_or(1, |last| last + 1);
        let widget = Widget {
            id,
            name: name.to_string(),
            owner: owner.map(str::to_string),
        };
        widgets.insert(id, widget.clone());
        widget
    }

    pub async fn get_widget(&self, id: u32) -> Option<Widget> {
        self.widgets.read().await.get(&id).cloned()
    }

    pub async fn get_widgets(&self) -> Vec<Widget> {
        self.widgets.read().await.values().cloned().collect()
    }

    /// Stands in for a call to an external owner directory.
    pub async fn lookup_owner(&self, widget: &Widget) -> Result<String> {
        widget
            .owner
            .clone()
            .ok_or_else(|| anyhow!("owner directory returned no record for widget {}", widget.id))
    }
}
