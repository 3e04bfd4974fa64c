use crate::page::{Page, DARK_ICON, DARK_MODE_CLASS, LIGHT_ICON};

/// Flips the `dark-mode` body class and points the theme icon at the matching image.
pub fn toggle_dark_mode(page: &mut Page) {
    if let Some(pos) = page.body_classes.iter().position(|c| c == DARK_MODE_CLASS) {
        page.body_classes.remove(pos);
    } else {
        page.body_classes.push(DARK_MODE_CLASS.to_string());
    }

    page.theme_icon = if page.has_body_class(DARK_MODE_CLASS) {
        DARK_ICON.to_string()
    } else {
        LIGHT_ICON.to_string()
    };
}
