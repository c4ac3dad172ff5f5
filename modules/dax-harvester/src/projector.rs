use crate::types::{RawPost, StoredRecord};

/// Flatten a fetched post into its storage shape.
pub fn project(post: RawPost) -> StoredRecord {
    StoredRecord {
        id: post.id,
        created_at: post.created_at,
        screen_name: post.screen_name,
        location: post.location,
        text: post.text,
        full_text: post.full_text,
        retweet: post.retweeted,
        verified: post.verified,
        retweet_count: narrow(post.retweet_count),
        hashtags: join_hashtags(&post.hashtags),
        favorite_count: post.favorite_count.map(narrow).unwrap_or(0),
        follower_count: narrow(post.follower_count),
    }
}

pub fn join_hashtags(hashtags: &[String]) -> String {
    hashtags.join(",")
}

/// Counts saturate at the `INTEGER` column maximum.
fn narrow(count: u64) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::raw_post;

    #[test]
    fn joins_hashtags_in_order() {
        let mut post = raw_post(1);
        post.hashtags = vec!["DAX".into(), "DowJones".into()];
        assert_eq!(project(post).hashtags, "DAX,DowJones");
    }

    #[test]
    fn no_hashtags_is_empty_string() {
        let mut post = raw_post(1);
        post.hashtags.clear();
        assert_eq!(project(post).hashtags, "");
    }

    #[test]
    fn single_hashtag_has_no_delimiter() {
        assert_eq!(join_hashtags(&["DAX".to_string()]), "DAX");
    }

    #[test]
    fn missing_favorite_count_is_zero() {
        let mut post = raw_post(1);
        post.favorite_count = None;
        assert_eq!(project(post).favorite_count, 0);
    }

    #[test]
    fn copies_fields() {
        let mut post = raw_post(77);
        post.retweeted = true;
        post.verified = true;
        post.retweet_count = 3;
        post.favorite_count = Some(9);
        post.follower_count = 1200;
        let created_at = post.created_at;

        let record = project(post);
        assert_eq!(record.id, 77);
        assert_eq!(record.created_at, created_at);
        assert!(record.retweet);
        assert!(record.verified);
        assert_eq!(record.retweet_count, 3);
        assert_eq!(record.favorite_count, 9);
        assert_eq!(record.follower_count, 1200);
        assert_eq!(record.screen_name, "trader77");
    }

    #[test]
    fn oversized_counts_saturate() {
        let mut post = raw_post(1);
        post.follower_count = u64::from(u32::MAX);
        assert_eq!(project(post).follower_count, i32::MAX);
    }
}
