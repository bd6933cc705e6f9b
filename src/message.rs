//! User-triggered actions and the action menu entries that map to them.

use crate::core::products::PRODUCTS;

/// Something the user asked the dashboard to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Refresh,
    /// Open `PRODUCTS[index]` in the browser.
    OpenProduct(usize),
    ToggleConfig,
    Quit,
}

/// One row of the action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionMenuItem {
    pub key: &'static str,
    pub label: &'static str,
    pub action: Action,
}

/// Entries shown by the action menu, including one per product.
#[must_use]
pub fn action_menu_items() -> Vec<ActionMenuItem> {
    const PRODUCT_KEYS: [&str; 9] = ["1", "2", "3", "4", "5", "6", "7", "8", "9"];

    let mut items = vec![ActionMenuItem {
        key: "r",
        label: "Refresh feeds now",
        action: Action::Refresh,
    }];
    items.extend(
        PRODUCTS
            .iter()
            .zip(PRODUCT_KEYS)
            .enumerate()
            .map(|(idx, (product, key))| ActionMenuItem {
                key,
                label: product.title,
                action: Action::OpenProduct(idx),
            }),
    );
    items.push(ActionMenuItem {
        key: "c",
        label: "View configuration",
        action: Action::ToggleConfig,
    });
    items.push(ActionMenuItem {
        key: "q",
        label: "Quit",
        action: Action::Quit,
    });
    items
}
