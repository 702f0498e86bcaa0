//! Add/edit team member editor.
//!
//! The role control holds the lower-cased role; whether a description is
//! required is always derived from that value.

use super::{Notification, Notifier, SubmitOutcome};
use crate::api::ApiClient;
use crate::errors::FormErrors;
use crate::models::{ImageUpload, TeamMember, TeamMemberPayload, TeamRole};

const DEFAULT_ROLE: &str = "authority";

#[derive(Debug, Clone, PartialEq)]
pub enum EditorMode {
    Add,
    Edit(TeamMember),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMemberForm {
    /// Value of the role control: `authority` or `member`
    pub team_role: String,
    pub name: String,
    pub designation: String,
    pub phone: String,
    pub description: String,
    pub image: Option<ImageUpload>,
}

impl Default for TeamMemberForm {
    fn default() -> Self {
        Self {
            team_role: DEFAULT_ROLE.to_string(),
            name: String::new(),
            designation: String::new(),
            phone: String::new(),
            description: String::new(),
            image: None,
        }
    }
}

impl TeamMemberForm {
    fn from_member(member: &TeamMember) -> Self {
        let team_role = member
            .team_role
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| DEFAULT_ROLE.to_string());

        Self {
            team_role,
            name: member.name.clone(),
            designation: member.designation.clone().unwrap_or_default(),
            phone: member.phone.clone().unwrap_or_default(),
            description: member
                .team_description
                .clone()
                .or_else(|| member.description.clone())
                .unwrap_or_default(),
            image: None,
        }
    }

    pub fn role(&self) -> Option<TeamRole> {
        TeamRole::parse(&self.team_role)
    }
}

pub struct TeamEditor {
    mode: EditorMode,
    form: TeamMemberForm,
    errors: FormErrors,
    image_base_url: String,
    open: bool,
}

impl TeamEditor {
    /// Open the editor, pre-filling the form from the record in edit mode.
    pub fn open(mode: EditorMode, image_base_url: impl Into<String>) -> Self {
        let form = match &mode {
            EditorMode::Add => TeamMemberForm::default(),
            EditorMode::Edit(member) => TeamMemberForm::from_member(member),
        };
        Self {
            mode,
            form,
            errors: FormErrors::new(),
            image_base_url: image_base_url.into(),
            open: true,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, EditorMode::Edit(_))
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Team Member"
        } else {
            "Add New Team Member"
        }
    }

    pub fn form(&self) -> &TeamMemberForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TeamMemberForm {
        &mut self.form
    }

    #[cfg(test)]
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn set_role(&mut self, role: TeamRole) {
        self.form.team_role = role.as_str().to_lowercase();
    }

    pub fn description_required(&self) -> bool {
        self.form.role() == Some(TeamRole::Authority)
    }

    pub fn description_placeholder(&self) -> &'static str {
        if self.description_required() {
            "Enter authority description"
        } else {
            "Enter member description (optional)"
        }
    }

    /// URL of the stored image in edit mode.
    pub fn preview_url(&self) -> Option<String> {
        let EditorMode::Edit(member) = &self.mode else {
            return None;
        };
        let image = member.image.as_deref().filter(|i| !i.is_empty())?;
        Some(format!(
            "{}/{}",
            self.image_base_url.trim_end_matches('/'),
            image.trim_start_matches('/')
        ))
    }

    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        if self.form.role().is_none() {
            errors.add("teamRole", "Please select a role");
        }
        errors.require("name", &self.form.name, "Please enter name");
        errors.require(
            "designation",
            &self.form.designation,
            "Please enter designation",
        );
        errors.require("phone", &self.form.phone, "Please enter Phone Number");
        if !self.is_edit() && self.form.image.is_none() {
            errors.add("image", "Please upload an image");
        }
        if self.description_required() {
            errors.require("description", &self.form.description, "Please enter description");
        }
        errors
    }

    /// The JSON carried in the upload's `data` part: fields trimmed, role upper-cased.
    pub fn payload(&self) -> Option<TeamMemberPayload> {
        Some(TeamMemberPayload {
            name: self.form.name.trim().to_string(),
            designation: self.form.designation.trim().to_string(),
            team_role: self.form.role()?,
            team_description: self.form.description.trim().to_string(),
            phone: self.form.phone.trim().to_string(),
        })
    }

    pub async fn submit(&mut self, api: &ApiClient, notifier: &dyn Notifier) -> SubmitOutcome {
        self.errors = self.validate();
        if !self.errors.is_empty() {
            return SubmitOutcome::Invalid(self.errors.clone());
        }
        let Some(payload) = self.payload() else {
            return SubmitOutcome::Invalid(self.errors.clone());
        };

        let image = self.form.image.as_ref();
        let result = match &self.mode {
            EditorMode::Add => api.create_team(&payload, image).await,
            EditorMode::Edit(member) => api.update_team(&member.id, &payload, image).await,
        };

        let edit = self.is_edit();
        match result {
            Ok(_) => {
                notifier.notify(Notification::success(if edit {
                    "Team member updated successfully"
                } else {
                    "Team member added successfully"
                }));
                self.close();
                SubmitOutcome::Completed { navigate: None }
            }
            Err(e) => {
                tracing::error!(
                    "Failed to {} team member: {}",
                    if edit { "update" } else { "create" },
                    e
                );
                notifier.notify(Notification::error(if edit {
                    "Failed to update team member"
                } else {
                    "Failed to add team member"
                }));
                SubmitOutcome::Failed
            }
        }
    }

    /// Discard edits and close.
    pub fn cancel(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.form = TeamMemberForm::default();
        self.errors = FormErrors::new();
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(role: Option<&str>) -> TeamMember {
        TeamMember {
            id: "t-1".to_string(),
            name: "Ana".to_string(),
            designation: Some("Dispatcher".to_string()),
            team_role: role.map(str::to_string),
            team_description: None,
            description: Some("Night shift lead".to_string()),
            phone: Some("+3557 000 447".to_string()),
            image: Some("/images/ana.png".to_string()),
        }
    }

    fn image() -> ImageUpload {
        ImageUpload {
            file_name: "a.png".to_string(),
            mime_type: Some("image/png".to_string()),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_edit_prefills_lowercase_role() {
        let editor = TeamEditor::open(EditorMode::Edit(member(Some("AUTHORITY"))), "http://img");

        assert_eq!(editor.form().team_role, "authority");
        assert_eq!(editor.form().name, "Ana");
        assert_eq!(editor.form().description, "Night shift lead");
        assert_eq!(editor.title(), "Edit Team Member");
    }

    #[test]
    fn test_payload_uppercases_role() {
        let editor = TeamEditor::open(EditorMode::Edit(member(Some("AUTHORITY"))), "http://img");
        let json = serde_json::to_value(editor.payload().unwrap()).unwrap();
        assert_eq!(json["teamRole"], "AUTHORITY");
    }

    #[test]
    fn test_payload_trims_text_fields() {
        let mut editor = TeamEditor::open(EditorMode::Add, "http://img");
        let form = editor.form_mut();
        form.name = "  Cy ".to_string();
        form.designation = "Mechanic\n".to_string();
        form.description = " Fixes vans ".to_string();
        form.phone = " 42 ".to_string();

        let payload = editor.payload().unwrap();
        assert_eq!(payload.name, "Cy");
        assert_eq!(payload.designation, "Mechanic");
        assert_eq!(payload.team_description, "Fixes vans");
        assert_eq!(payload.phone, "42");
    }

    #[test]
    fn test_missing_role_defaults_to_authority() {
        let editor = TeamEditor::open(EditorMode::Edit(member(None)), "http://img");
        assert_eq!(editor.form().team_role, "authority");
    }

    #[test]
    fn test_description_optional_for_member() {
        let mut editor = TeamEditor::open(EditorMode::Add, "http://img");
        editor.set_role(TeamRole::Member);
        let form = editor.form_mut();
        form.name = "Bo".to_string();
        form.designation = "Driver".to_string();
        form.phone = "123".to_string();
        form.image = Some(image());

        assert!(!editor.description_required());
        assert!(editor.validate().is_empty());
    }

    #[test]
    fn test_description_required_for_authority() {
        let mut editor = TeamEditor::open(EditorMode::Add, "http://img");
        let form = editor.form_mut();
        form.name = "Bo".to_string();
        form.designation = "Manager".to_string();
        form.phone = "123".to_string();
        form.image = Some(image());

        let errors = editor.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("description"), Some("Please enter description"));
    }

    #[test]
    fn test_image_required_only_when_adding() {
        let add = TeamEditor::open(EditorMode::Add, "http://img");
        assert_eq!(add.validate().get("image"), Some("Please upload an image"));

        let edit = TeamEditor::open(EditorMode::Edit(member(Some("MEMBER"))), "http://img");
        assert!(edit.validate().is_empty());
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let mut editor = TeamEditor::open(EditorMode::Edit(member(Some("OWNER"))), "http://img");
        assert_eq!(editor.form().team_role, "owner");
        assert_eq!(editor.validate().get("teamRole"), Some("Please select a role"));

        editor.set_role(TeamRole::Member);
        assert!(editor.validate().get("teamRole").is_none());
    }

    #[test]
    fn test_preview_url() {
        let edit = TeamEditor::open(EditorMode::Edit(member(None)), "http://img.example/");
        assert_eq!(
            edit.preview_url().as_deref(),
            Some("http://img.example/images/ana.png")
        );
        assert!(TeamEditor::open(EditorMode::Add, "http://img").preview_url().is_none());
    }

    #[test]
    fn test_cancel_resets_and_closes() {
        let mut editor = TeamEditor::open(EditorMode::Edit(member(Some("MEMBER"))), "http://img");
        editor.cancel();
        assert!(!editor.is_open());
        assert_eq!(editor.form(), &TeamMemberForm::default());
    }
}
