use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use pano_types::models::{ChatMessage, Contact, Session};
use pano_types::{Error, Result};

use crate::App;

impl App {
    /// File a support ticket owned by the session user, with an empty
    /// message thread. Contacts are never deleted.
    pub fn file_contact(
        &self,
        session: &Session,
        display_name: &str,
        reason: &str,
        image: Option<String>,
    ) -> Result<Contact> {
        let mut contacts = self.store().contacts()?;

        let contact = Contact {
            id: Uuid::new_v4(),
            owner: session.username.clone(),
            display_name: display_name.to_string(),
            reason: reason.to_string(),
            image,
            messages: Vec::new(),
            created_at: Utc::now(),
        };
        contacts.push(contact.clone());
        self.store().save_contacts(&contacts)?;

        info!(owner = %session.username, "contact filed");
        Ok(contact)
    }

    /// Admins see every ticket; a regular user sees only their own.
    pub fn list_contacts(&self, session: &Session) -> Result<Vec<Contact>> {
        let contacts = self.store().contacts()?;
        if session.is_admin() {
            return Ok(contacts);
        }
        Ok(contacts
            .into_iter()
            .filter(|c| c.owner == session.username)
            .collect())
    }

    /// Append to a contact's thread. `index` addresses the full contact
    /// sequence in filing order. The sender label comes from the session,
    /// and only the owner or an admin may write to a thread.
    pub fn append_message(
        &self,
        session: &Session,
        index: usize,
        text: &str,
    ) -> Result<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyMessage);
        }

        let mut contacts = self.store().contacts()?;
        let contact = contacts.get_mut(index).ok_or(Error::NotFound(index))?;
        if !session.is_admin() && contact.owner != session.username {
            return Err(Error::Unauthorized);
        }

        let message = ChatMessage {
            id: Uuid::new_v4(),
            sender: session.username.clone(),
            text: text.to_string(),
            sent_at: Utc::now(),
        };
        contact.messages.push(message.clone());
        self.store().save_contacts(&contacts)?;

        Ok(message)
    }

    /// The ordered message thread of one contact, same visibility rule as
    /// writing.
    pub fn thread(&self, session: &Session, index: usize) -> Result<Vec<ChatMessage>> {
        let contacts = self.store().contacts()?;
        let contact = contacts.get(index).ok_or(Error::NotFound(index))?;
        if !session.is_admin() && contact.owner != session.username {
            return Err(Error::Unauthorized);
        }
        Ok(contact.messages.clone())
    }
}
