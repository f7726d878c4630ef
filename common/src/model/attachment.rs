use serde::{Deserialize, Serialize};

/// Handle to a durably stored attachment: the filename the user declared plus
/// the backend-specific storage reference (relative path, file id, object key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub name: String,
    pub location: String,
}
