use chrono::Datelike;

use crate::config::SiteLink;
use crate::page::{Footer, Page};

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Fills the `year` element: `©️ <year> ` followed by a link to the author's site.
pub fn render_footer(page: &mut Page, year: i32, site: &SiteLink) {
    page.footer = Some(Footer {
        year_text: format!("©️ {} ", year),
        link: site.clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_carries_year_and_link() {
        let site = SiteLink {
            name: "Prakash78Blog".into(),
            href: "https://prakash78blog.wordpress.com".into(),
        };
        let mut page = Page::new("/");
        render_footer(&mut page, 2026, &site);

        let footer = page.footer.unwrap();
        assert_eq!(footer.year_text, "©️ 2026 ");
        assert_eq!(footer.link, site);
    }

    #[test]
    fn current_year_is_plausible() {
        assert!(current_year() >= 2024);
    }
}
