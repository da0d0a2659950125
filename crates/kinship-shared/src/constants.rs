/// Application name
pub const APP_NAME: &str = "Kinship";

/// Default API host (scheme, address and port, no trailing slash)
pub const DEFAULT_HOST: &str = "http://127.0.0.1:3000";

/// Default API route prefix appended to the host
pub const DEFAULT_API_ROUTE: &str = "/api/v1";

/// Envelope status value for a successful response
pub const STATUS_SUCCESS: &str = "success";

/// Maximum media upload size in bytes (50 MiB)
pub const MAX_UPLOAD_SIZE: usize = 50 * 1024 * 1024;

/// Multipart field names used by the upload endpoints
pub const FIELD_POST_CONTENT: &str = "content";
pub const FIELD_POST_MEDIA: &str = "mediaFiles";
pub const FIELD_PROFILE_PICTURE: &str = "profilePicture";

/// Placeholder shown for posts without media
pub const NO_IMAGES_TEXT: &str = "No images for this post.";

/// Fallback author name when a post or comment omits it
pub const UNKNOWN_AUTHOR: &str = "Unknown";
