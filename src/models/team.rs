//! Team member model matching the API's team resource.

use serde::{Deserialize, Serialize};

/// Role of a team member. Sent upper-cased on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TeamRole {
    #[serde(alias = "authority")]
    Authority,
    #[serde(alias = "member")]
    Member,
}

impl TeamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::Authority => "AUTHORITY",
            TeamRole::Member => "MEMBER",
        }
    }

    /// Parse a role in any letter case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "AUTHORITY" => Some(TeamRole::Authority),
            "MEMBER" => Some(TeamRole::Member),
            _ => None,
        }
    }
}

/// A team member as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub designation: Option<String>,
    /// Raw role string as stored by the server
    #[serde(default)]
    pub team_role: Option<String>,
    #[serde(default)]
    pub team_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Relative path of the uploaded image
    #[serde(default)]
    pub image: Option<String>,
}

/// JSON carried in the `data` part of a team create/update upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberPayload {
    pub name: String,
    pub designation: String,
    pub team_role: TeamRole,
    pub team_description: String,
    pub phone: String,
}

/// Image file attached to a team upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Read an image from disk, guessing the MIME type from its extension.
    pub fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let mime_type = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string());
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        let payload = TeamMemberPayload {
            name: "Ana".to_string(),
            designation: "Dispatcher".to_string(),
            team_role: TeamRole::Authority,
            team_description: String::new(),
            phone: "+3557 000 447".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["teamRole"], "AUTHORITY");
        assert_eq!(json["teamDescription"], "");
    }

    #[test]
    fn test_role_parse_any_case() {
        assert_eq!(TeamRole::parse("authority"), Some(TeamRole::Authority));
        assert_eq!(TeamRole::parse("MEMBER"), Some(TeamRole::Member));
        assert_eq!(TeamRole::parse("owner"), None);
    }

    #[test]
    fn test_image_mime_type_from_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let cases = [
            ("a.png", Some("image/png")),
            ("a.JPG", Some("image/jpeg")),
            ("a.bmp", Some("image/bmp")),
            ("a.tiff", Some("image/tiff")),
            ("a.ico", Some("image/x-icon")),
            ("a.unknownext", None),
        ];

        for (name, expected) in cases {
            let path = dir.path().join(name);
            std::fs::write(&path, [0u8, 1, 2]).unwrap();
            let upload = ImageUpload::from_path(&path).unwrap();
            assert_eq!(upload.mime_type.as_deref(), expected, "{}", name);
            assert_eq!(upload.file_name, name);
            assert_eq!(upload.bytes, vec![0, 1, 2]);
        }
    }

    #[test]
    fn test_member_accepts_mongo_id() {
        let member: TeamMember = serde_json::from_value(serde_json::json!({
            "_id": "abc",
            "name": "Ana",
            "teamRole": "MEMBER"
        }))
        .unwrap();
        assert_eq!(member.id, "abc");
        assert_eq!(member.team_role.as_deref(), Some("MEMBER"));
        assert!(member.image.is_none());
    }
}
