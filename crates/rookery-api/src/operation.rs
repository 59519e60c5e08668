//! The operation registry.
//!
//! A fixed set of named GraphQL operations, each with its document and
//! its cache-tag bindings. The documents carry the exact field
//! selections the backend schema serves; nothing here is generated.

use serde_json::Value;

/// Cache categories a query result belongs to and a mutation can evict.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Any post list.
    Post,
    /// One specific post.
    PostId(String),
    Profile,
    Comment,
    Notification,
}

impl Tag {
    /// Whether an invalidated tag evicts an entry providing this tag.
    ///
    /// A bare `Post` invalidation evicts id-specific entries too, and an
    /// id-specific invalidation evicts entries providing the bare type;
    /// two id-specific tags only intersect on equal ids.
    pub fn intersects(&self, invalidated: &Tag) -> bool {
        match (self, invalidated) {
            (Tag::Post, Tag::Post)
            | (Tag::Profile, Tag::Profile)
            | (Tag::Comment, Tag::Comment)
            | (Tag::Notification, Tag::Notification) => true,
            (Tag::Post, Tag::PostId(_)) | (Tag::PostId(_), Tag::Post) => true,
            (Tag::PostId(a), Tag::PostId(b)) => a == b,
            _ => false,
        }
    }
}

/// One named operation: a parameterized document plus a stable name used
/// as the cache-key prefix.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
}

/// Canonical cache key for a (operation, arguments) pair.
///
/// Variables are serialized through `serde_json`, whose object key order
/// is insertion order; every call site builds the same object shape, so
/// equal arguments produce equal keys.
pub fn cache_key(operation: &Operation, variables: &Value) -> String {
    format!("{}({})", operation.name, variables)
}

pub const LOGIN: Operation = Operation {
    name: "login",
    document: r#"
      mutation TokenAuth($username: String!, $password: String!) {
        tokenAuth(username: $username, password: $password) {
          token
          refreshToken
          user {
            id
            user {
              username
            }
            displayName
            bio
            avatarUrl
          }
        }
      }
    "#,
};

pub const CREATE_USER: Operation = Operation {
    name: "createUser",
    document: r#"
      mutation CreateUser($username: String!, $password: String!, $email: String, $displayName: String) {
        createUser(username: $username, password: $password, email: $email, displayName: $displayName) {
          user {
            id
            displayName
            bio
            avatarUrl
          }
          token
          refreshToken
        }
      }
    "#,
};

pub const GET_ME: Operation = Operation {
    name: "getMe",
    document: r#"
      query Me {
        me {
          id
          displayName
          bio
          avatarUrl
          followerCount
          followingCount
        }
      }
    "#,
};

pub const GET_PROFILE_BY_USERNAME: Operation = Operation {
    name: "getProfileByUsername",
    document: r#"
      query ProfileByUsername($username: String!) {
        profileByUsername(username: $username) {
          id
          displayName
          bio
          createdAt
          avatarUrl
          followerCount
          followingCount
          posts {
            id
            content
            likeCount
            commentCount
            createdAt
            author {
              id
              displayName
              avatarUrl
              user {
                username
              }
            }
          }
        }
      }
    "#,
};

pub const GET_ALL_POSTS: Operation = Operation {
    name: "getAllPosts",
    document: r#"
      query AllPosts {
        allPosts {
          id
          content
          likeCount
          commentCount
          createdAt
          author {
            id
            displayName
            avatarUrl
            user {
              username
            }
          }
        }
      }
    "#,
};

pub const GET_FOLLOWING_FEED: Operation = Operation {
    name: "getFollowingFeed",
    document: r#"
      query FollowingFeed {
        followingFeed {
          id
          content
          likeCount
          commentCount
          createdAt
          author {
            id
            displayName
            avatarUrl
          }
        }
      }
    "#,
};

pub const GET_TRENDING_FEED: Operation = Operation {
    name: "getTrendingFeed",
    document: r#"
      query TrendingFeed {
        trendingFeed {
          id
          content
          likeCount
          commentCount
          createdAt
          author {
            id
            displayName
            avatarUrl
          }
        }
      }
    "#,
};

pub const GET_POST: Operation = Operation {
    name: "getPost",
    document: r#"
      query Post($id: Int!) {
        post(id: $id) {
          id
          content
          likeCount
          commentCount
          createdAt
          author {
            id
            displayName
            avatarUrl
          }
          comments {
            id
            content
            createdAt
            author {
              id
              displayName
              avatarUrl
            }
          }
        }
      }
    "#,
};

pub const CREATE_POST: Operation = Operation {
    name: "createPost",
    document: r#"
      mutation CreatePost($content: String!, $visibility: String) {
        createPost(content: $content, visibility: $visibility) {
          post {
            id
            content
            likeCount
            commentCount
            createdAt
            author {
              id
              displayName
              avatarUrl
            }
          }
        }
      }
    "#,
};

pub const CREATE_COMMENT: Operation = Operation {
    name: "createComment",
    document: r#"
      mutation CreateComment($postId: Int!, $content: String!) {
        createComment(postId: $postId, content: $content) {
          comment {
            id
            content
            createdAt
            author {
              id
              displayName
              avatarUrl
            }
          }
        }
      }
    "#,
};

pub const REACT_TO_POST: Operation = Operation {
    name: "reactToPost",
    document: r#"
      mutation ReactToPost($postId: String!, $reactionType: String) {
        reactToPost(postId: $postId, reactionType: $reactionType) {
          ok
        }
      }
    "#,
};

pub const FOLLOW_USER: Operation = Operation {
    name: "followUser",
    document: r#"
      mutation FollowUser($userId: Int!) {
        followUser(userId: $userId) {
          ok
        }
      }
    "#,
};

pub const UNFOLLOW_USER: Operation = Operation {
    name: "unfollowUser",
    document: r#"
      mutation UnfollowUser($userId: Int!) {
        unfollowUser(userId: $userId) {
          ok
        }
      }
    "#,
};

pub const GET_MY_NOTIFICATIONS: Operation = Operation {
    name: "getMyNotifications",
    document: r#"
      query MyNotifications($unreadOnly: Boolean) {
        myNotifications(unreadOnly: $unreadOnly) {
          id
          type
          isRead
          createdAt
          actor {
            id
            displayName
            avatarUrl
          }
          post {
            id
            content
          }
        }
      }
    "#,
};

pub const MARK_NOTIFICATION_READ: Operation = Operation {
    name: "markNotificationRead",
    document: r#"
      mutation MarkNotificationRead($notificationId: Int!) {
        markNotificationRead(notificationId: $notificationId) {
          ok
        }
      }
    "#,
};
