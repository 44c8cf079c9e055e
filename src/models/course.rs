use serde::{Deserialize, Serialize};

use super::LookupId;

/// Course record as returned by `/universities/search`. Server-owned, read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: LookupId,
    pub name: String,
    #[serde(default)]
    pub university_id: Option<LookupId>,
    #[serde(default)]
    pub field_id: Option<LookupId>,
    #[serde(default)]
    pub specialization_id: Option<LookupId>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub university_name: Option<String>,
    #[serde(default)]
    pub field_name: Option<String>,
    #[serde(default)]
    pub specialization_name: Option<String>,
}

/// Validated body of `POST /universities/add`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub name: String,
    pub university_id: LookupId,
    pub field_id: LookupId,
    pub specialization_id: LookupId,
    pub level: String,
    pub duration: String,
    pub link: String,
}

/// File picked in the upload tab, sent as the `file` multipart part
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
        }
    }
}
