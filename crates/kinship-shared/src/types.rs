use serde::{Deserialize, Serialize};

// Server identifiers are opaque strings (document ids on the API side). Each
// entity gets its own newtype so a post id can never be passed where a chat
// id is expected.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// First eight characters, for log lines.
            pub fn short(&self) -> &str {
                match self.0.char_indices().nth(8) {
                    Some((idx, _)) => &self.0[..idx],
                    None => &self.0,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Identifier of a user account.
    UserId
);
string_id!(
    /// Identifier of a post.
    PostId
);
string_id!(
    /// Identifier of a comment on a post.
    CommentId
);
string_id!(
    /// Identifier of a one-to-one chat.
    ChatId
);
string_id!(
    /// Identifier of a chat message.
    MessageId
);
string_id!(
    /// Identifier of a pending friend-request notification.
    NotificationId
);

/// Which list of posts a post-listing screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Feed {
    /// Most recent posts across the network (home screen).
    Recent,
    /// Posts authored by the signed-in user.
    Mine,
    /// Posts shared by the given user.
    SharedBy(UserId),
}

impl Feed {
    /// Path segments of the listing, relative to the API route. Ids are
    /// returned raw; encoding them is the URL builder's job.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Feed::Recent => vec!["posts", "recent"],
            Feed::Mine => vec!["posts", "myPosts"],
            Feed::SharedBy(user) => vec!["posts", "sharedPosts", user.as_str()],
        }
    }
}

impl std::fmt::Display for Feed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feed::Recent => f.write_str("recent"),
            Feed::Mine => f.write_str("mine"),
            Feed::SharedBy(user) => write!(f, "shared-by:{}", user.short()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = PostId::new("65f1c0ffee");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"65f1c0ffee\"");

        let back: PostId = serde_json::from_str("\"65f1c0ffee\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_short_id() {
        assert_eq!(UserId::from("0123456789abcdef").short(), "01234567");
        assert_eq!(UserId::from("42").short(), "42");
    }

    #[test]
    fn test_feed_segments() {
        assert_eq!(Feed::Recent.segments(), vec!["posts", "recent"]);
        assert_eq!(Feed::Mine.segments(), vec!["posts", "myPosts"]);
        assert_eq!(
            Feed::SharedBy(UserId::from("u1")).segments(),
            vec!["posts", "sharedPosts", "u1"]
        );
    }
}
