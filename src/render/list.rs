use chrono::{Local, NaiveTime};
use std::sync::{Arc, Mutex, PoisonError};

/// Something that displays the current product list.
pub trait RenderTarget: Send + Sync + 'static {
    /// Clears every existing item and appends `items` in order.
    fn replace_items(&self, items: Vec<String>);
}

/// In-memory list container. Clones share the same children, so a test or view can
/// hold one clone while the poller writes through another.
#[derive(Debug, Clone)]
pub struct ListElement {
    id: String,
    children: Arc<Mutex<Vec<String>>>,
}

impl ListElement {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn items(&self) -> Vec<String> {
        self.children
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.children
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RenderTarget for ListElement {
    fn replace_items(&self, items: Vec<String>) {
        let mut children = self.children.lock().unwrap_or_else(PoisonError::into_inner);
        *children = items;
    }
}

/// Prints each rendered list to standard output, stamped with the local time.
#[derive(Debug, Clone)]
pub struct StdoutList {
    id: String,
}

impl StdoutList {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The block printed for one render, headed by the target id and `updated` time.
    pub fn render_block(&self, items: &[String], updated: NaiveTime) -> String {
        let mut out = format!(
            "#{} ({} items, updated {})\n",
            self.id,
            items.len(),
            updated.format("%H:%M:%S")
        );
        for item in items {
            out.push_str("  - ");
            out.push_str(item);
            out.push('\n');
        }
        out
    }
}

impl RenderTarget for StdoutList {
    fn replace_items(&self, items: Vec<String>) {
        // one write so overlapping cycles don't interleave lines
        print!("{}", self.render_block(&items, Local::now().time()));
    }
}
