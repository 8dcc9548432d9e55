use iced::widget::Id;

/// One row of menu content.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry<T> {
    Item {
        id: T,
        label: String,
        disabled: bool,
    },
    Divider,
}

impl<T> MenuEntry<T> {
    pub fn item(id: T, label: impl Into<String>) -> Self {
        MenuEntry::Item {
            id,
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled_item(id: T, label: impl Into<String>) -> Self {
        MenuEntry::Item {
            id,
            label: label.into(),
            disabled: true,
        }
    }
}

/// Rows shown by a menu plus the container id passed through to the view.
#[derive(Debug, Clone)]
pub struct MenuContent<T> {
    entries: Vec<MenuEntry<T>>,
    test_id: Option<Id>,
}

impl<T> Default for MenuContent<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            test_id: None,
        }
    }
}

impl<T> MenuContent<T> {
    pub fn new(entries: Vec<MenuEntry<T>>) -> Self {
        Self {
            entries,
            test_id: None,
        }
    }

    /// Id assigned to the menu container widget.
    pub fn with_test_id(mut self, id: Id) -> Self {
        self.test_id = Some(id);
        self
    }

    pub fn entries(&self) -> &[MenuEntry<T>] {
        &self.entries
    }

    pub fn test_id(&self) -> Option<&Id> {
        self.test_id.as_ref()
    }
}
