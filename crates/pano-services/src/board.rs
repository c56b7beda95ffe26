use chrono::Utc;
use tracing::info;

use pano_types::models::{Announcement, Section, Session};
use pano_types::{Error, Result};

use crate::App;

impl App {
    /// Append an announcement to a section. Writes are admin-only; reads
    /// are open to everyone, so listing takes no session.
    pub fn post_announcement(
        &self,
        session: &Session,
        section: Section,
        text: &str,
    ) -> Result<Announcement> {
        if !session.is_admin() {
            return Err(Error::Unauthorized);
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyMessage);
        }

        let mut board = self.store().announcements()?;
        let announcement = Announcement {
            text: text.to_string(),
            posted_by: session.username.clone(),
            posted_at: Utc::now(),
        };
        board.entry(section).or_default().push(announcement.clone());
        self.store().save_announcements(&board)?;

        info!(%section, by = %session.username, "announcement posted");
        Ok(announcement)
    }

    /// The ordered announcement texts for a section; insertion order is
    /// display order.
    pub fn list_announcements(&self, section: Section) -> Result<Vec<String>> {
        Ok(self
            .section_entries(section)?
            .into_iter()
            .map(|a| a.text)
            .collect())
    }

    /// Full announcement records, including poster and timestamp.
    pub fn section_entries(&self, section: Section) -> Result<Vec<Announcement>> {
        let board = self.store().announcements()?;
        Ok(board.get(&section).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pano_store::Store;

    fn test_app() -> App {
        App::with_store(Store::open_in_memory().unwrap(), Config::default())
    }

    fn admin_session(app: &App) -> Session {
        app.signup("TFDholderr", "Admin", "pw").unwrap();
        app.login("TFDholderr", "pw").unwrap()
    }

    fn user_session(app: &App) -> Session {
        app.signup("ayse", "Ayşe", "pw").unwrap();
        app.login("ayse", "pw").unwrap()
    }

    #[test]
    fn admin_posts_append_in_order() {
        let app = test_app();
        let admin = admin_session(&app);

        app.post_announcement(&admin, Section::Dev, "v1 released").unwrap();
        app.post_announcement(&admin, Section::Dev, "v1.1 hotfix").unwrap();

        assert_eq!(
            app.list_announcements(Section::Dev).unwrap(),
            vec!["v1 released", "v1.1 hotfix"]
        );

        let entries = app.section_entries(Section::Dev).unwrap();
        assert_eq!(entries[0].posted_by, "TFDholderr");
    }

    #[test]
    fn non_admin_post_is_unauthorized_and_board_unchanged() {
        let app = test_app();
        let user = user_session(&app);

        let err = app
            .post_announcement(&user, Section::Dev, "v1 released")
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized));
        assert!(app.list_announcements(Section::Dev).unwrap().is_empty());
    }

    #[test]
    fn sections_are_independent() {
        let app = test_app();
        let admin = admin_session(&app);

        app.post_announcement(&admin, Section::News, "toplantı yarın").unwrap();

        assert_eq!(app.list_announcements(Section::News).unwrap().len(), 1);
        assert!(app.list_announcements(Section::General).unwrap().is_empty());
    }

    #[test]
    fn blank_text_rejected() {
        let app = test_app();
        let admin = admin_session(&app);

        let err = app
            .post_announcement(&admin, Section::General, "   ")
            .unwrap_err();
        assert!(matches!(err, Error::EmptyMessage));
        assert!(app.list_announcements(Section::General).unwrap().is_empty());
    }
}
