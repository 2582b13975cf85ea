//! The fixed platform schema catalog.
//!
//! Seven content tables plus the PostLike junction, declared exactly as
//! the platform defines them. This is the single source of truth the
//! diagram is generated from; nothing is mutated after construction.

use crate::schema::{ColumnType, Schema, TableSchema};
use ColumnType::{Bool, DateTime, Int, Text};

/// Build the full platform schema
pub fn platform_schema() -> Schema {
    let mut schema = Schema::new();

    schema.add_table(
        TableSchema::new("User")
            .pk("id", Text)
            .unique("username", Text)
            .unique("email", Text)
            .col("displayName", Text)
            .nullable("bio", Text)
            .nullable("avatar", Text)
            .col("level", Int)
            .col("pointsToNext", Int)
            .col("joinDate", DateTime)
            .timestamps(),
    );

    schema.add_table(
        TableSchema::new("Community")
            .pk("id", Text)
            .col("name", Text)
            .nullable("description", Text)
            .col("type", Text)
            .col("memberCount", Int)
            .fk("ownerId", Text, "User", "id")
            .timestamps(),
    );

    schema.add_table(
        TableSchema::new("Post")
            .pk("id", Text)
            .fk("authorId", Text, "User", "id")
            .col("author", Text)
            .col("content", Text)
            .col("likes", Int)
            .col("comments", Int)
            .col("isPinned", Bool)
            .col("level", Int)
            .fk("communityId", Text, "Community", "id")
            .col("category", Text)
            .col("commentersCount", Int)
            .nullable("newCommentTimeAgo", Text)
            .timestamps(),
    );

    schema.add_table(
        TableSchema::new("Comment")
            .pk("id", Text)
            .fk("postId", Text, "Post", "id")
            .fk("authorId", Text, "User", "id")
            .col("author", Text)
            .col("content", Text)
            .timestamps(),
    );

    schema.add_table(
        TableSchema::new("Course")
            .pk("id", Text)
            .col("title", Text)
            .nullable("description", Text)
            .fk("authorId", Text, "User", "id")
            .fk("communityId", Text, "Community", "id")
            .timestamps()
            .col("lastSaved", DateTime),
    );

    schema.add_table(
        TableSchema::new("Module")
            .pk("id", Text)
            .col("title", Text)
            .nullable("description", Text)
            .fk("courseId", Text, "Course", "id")
            .col("order", Int)
            .timestamps(),
    );

    schema.add_table(
        TableSchema::new("Lesson")
            .pk("id", Text)
            .col("title", Text)
            .nullable("content", Text)
            .col("type", Text)
            .fk("moduleId", Text, "Module", "id")
            .col("order", Int)
            .nullable("duration", Int)
            .col("isCompleted", Bool)
            .timestamps(),
    );

    // Junction table for the User <-> Post many-to-many
    schema.add_table(
        TableSchema::new("PostLike")
            .pk_fk("postId", Text, "Post", "id")
            .pk_fk("userId", Text, "User", "id")
            .col("createdAt", DateTime),
    );

    schema
}
