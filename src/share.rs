//! Share links for mood boards.

use crate::constants::SHARED_PATH_SEGMENT;
use crate::types::MoodBoardId;

/// `<base>/shared/<id>`, with a trailing slash on `base` ignored and the id
/// percent-encoded.
pub fn share_url(base: &str, id: &MoodBoardId) -> String {
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        SHARED_PATH_SEGMENT,
        urlencoding::encode(id.as_str())
    )
}
