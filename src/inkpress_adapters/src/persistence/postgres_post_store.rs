use std::collections::HashMap;

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Pool, Postgres, QueryBuilder, Row};

use inkpress_core::{
    Email, ImageMeta, NewPost, Post, PostAuthor, PostFilter, PostId, PostPatch, PostStore,
    PostStoreError, UserId, Username,
};

/// Post rows joined with their owner; images are attached in a second query.
const POST_SELECT: &str = "SELECT p.id, p.title, p.content, p.published, p.created_at, \
                           p.created_by, u.username, u.email \
                           FROM posts p JOIN users u ON u.id = p.created_by";

#[derive(Clone)]
pub struct PostgresPostStore {
    pool: PgPool,
}

impl PostgresPostStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresPostStore { pool }
    }

    /// Attach image descriptors to the posts they belong to.
    async fn load_images(&self, posts: &mut [Post]) -> Result<(), PostStoreError> {
        if posts.is_empty() {
            return Ok(());
        }
        let ids: Vec<i64> = posts.iter().map(|p| p.id.0).collect();
        let rows = sqlx::query(
            "SELECT post_id, location, filename, size, content_type \
             FROM images WHERE post_id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        let mut by_post: HashMap<i64, Vec<ImageMeta>> = HashMap::new();
        for row in rows {
            let post_id: i64 = row.try_get("post_id").map_err(unexpected)?;
            by_post.entry(post_id).or_default().push(ImageMeta {
                location: row.try_get("location").map_err(unexpected)?,
                filename: row.try_get("filename").map_err(unexpected)?,
                size: row.try_get("size").map_err(unexpected)?,
                content_type: row.try_get("content_type").map_err(unexpected)?,
            });
        }
        for post in posts {
            if let Some(images) = by_post.remove(&post.id.0) {
                post.images = images;
            }
        }
        Ok(())
    }

    async fn fetch_filtered(
        &self,
        owner: Option<UserId>,
        filter: &PostFilter,
    ) -> Result<Vec<Post>, PostStoreError> {
        let mut builder = QueryBuilder::<Postgres>::new(POST_SELECT);
        push_filter(&mut builder, owner, filter);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;

        let mut posts = rows
            .iter()
            .map(row_to_post)
            .collect::<Result<Vec<_>, _>>()?;
        self.load_images(&mut posts).await?;
        Ok(posts)
    }
}

fn unexpected(e: impl std::fmt::Display) -> PostStoreError {
    PostStoreError::Unexpected(e.to_string())
}

fn row_to_post(row: &PgRow) -> Result<Post, PostStoreError> {
    let username: String = row.try_get("username").map_err(unexpected)?;
    let email: String = row.try_get("email").map_err(unexpected)?;
    Ok(Post {
        id: PostId(row.try_get("id").map_err(unexpected)?),
        title: row.try_get("title").map_err(unexpected)?,
        content: row.try_get("content").map_err(unexpected)?,
        published: row.try_get("published").map_err(unexpected)?,
        created_at: row.try_get("created_at").map_err(unexpected)?,
        created_by: UserId(row.try_get("created_by").map_err(unexpected)?),
        author: PostAuthor {
            username: Username::try_from(username).map_err(unexpected)?,
            email: Email::try_from(email).map_err(unexpected)?,
        },
        images: Vec::new(),
    })
}

/// Compose WHERE/ORDER BY from the enumerated filter keys. Sort columns come
/// from the whitelist on `PostSortKey`, never from raw input.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, owner: Option<UserId>, filter: &PostFilter) {
    let mut has_where = false;
    let and = |builder: &mut QueryBuilder<'_, Postgres>, has_where: &mut bool| {
        if *has_where {
            builder.push(" AND ");
        } else {
            builder.push(" WHERE ");
            *has_where = true;
        }
    };

    if let Some(owner) = owner {
        and(builder, &mut has_where);
        builder.push("p.created_by = ").push_bind(owner.0);
    }
    if let Some(title_like) = &filter.title_like {
        and(builder, &mut has_where);
        builder
            .push("p.title ILIKE ")
            .push_bind(format!("%{title_like}%"));
    }
    if let Some(published) = filter.published {
        and(builder, &mut has_where);
        builder.push("p.published = ").push_bind(published);
    }
    if let Some(search) = &filter.search {
        and(builder, &mut has_where);
        builder
            .push("p.content ILIKE ")
            .push_bind(format!("%{search}%"));
    }
    if let Some(username) = &filter.username {
        and(builder, &mut has_where);
        builder.push("u.username = ").push_bind(username.clone());
    }

    if !filter.order_by.is_empty() {
        builder.push(" ORDER BY ");
        for (i, field) in filter.order_by.iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            builder.push("p.");
            builder.push(field.key.column());
            builder.push(if field.descending { " DESC" } else { " ASC" });
        }
    } else {
        // Stable default so pages read back in insertion order.
        builder.push(" ORDER BY p.id ASC");
    }
}

#[async_trait::async_trait]
impl PostStore for PostgresPostStore {
    #[tracing::instrument(name = "Adding post to PostgreSQL", skip_all, fields(title = %new_post.title))]
    async fn add_post(&self, new_post: NewPost) -> Result<Post, PostStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let taken = sqlx::query("SELECT 1 FROM posts WHERE title = $1")
            .bind(&new_post.title)
            .fetch_optional(&mut *tx)
            .await
            .map_err(unexpected)?;
        if taken.is_some() {
            return Err(PostStoreError::TitleTaken);
        }

        let row = sqlx::query(
            r#"
                INSERT INTO posts (title, content, created_by)
                VALUES ($1, $2, $3)
                RETURNING id, published, created_at
            "#,
        )
        .bind(&new_post.title)
        .bind(&new_post.content)
        .bind(new_post.created_by.0)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .and_then(|db| db.constraint())
                .is_some()
            {
                PostStoreError::TitleTaken
            } else {
                unexpected(e)
            }
        })?;

        tx.commit().await.map_err(unexpected)?;

        Ok(Post {
            id: PostId(row.try_get("id").map_err(unexpected)?),
            title: new_post.title,
            content: new_post.content,
            published: row.try_get("published").map_err(unexpected)?,
            created_at: row.try_get("created_at").map_err(unexpected)?,
            created_by: new_post.created_by,
            author: new_post.author,
            images: Vec::new(),
        })
    }

    #[tracing::instrument(name = "Retrieving owned post from PostgreSQL", skip_all)]
    async fn get_own(&self, id: PostId, owner: UserId) -> Result<Post, PostStoreError> {
        let row = sqlx::query(&format!(
            "{POST_SELECT} WHERE p.id = $1 AND p.created_by = $2"
        ))
        .bind(id.0)
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(PostStoreError::PostNotFound);
        };

        let mut posts = vec![row_to_post(&row)?];
        self.load_images(&mut posts).await?;
        Ok(posts.remove(0))
    }

    #[tracing::instrument(name = "Updating post in PostgreSQL", skip_all)]
    async fn update_post(
        &self,
        id: PostId,
        owner: UserId,
        patch: PostPatch,
    ) -> Result<Post, PostStoreError> {
        if patch.is_empty() {
            return self.get_own(id, owner).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE posts SET ");
        let mut fields = builder.separated(", ");
        if let Some(content) = &patch.content {
            fields.push("content = ").push_bind_unseparated(content);
        }
        if let Some(published) = patch.published {
            fields.push("published = ").push_bind_unseparated(published);
        }
        builder
            .push(" WHERE id = ")
            .push_bind(id.0)
            .push(" AND created_by = ")
            .push_bind(owner.0);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(PostStoreError::PostNotFound);
        }

        self.get_own(id, owner).await
    }

    #[tracing::instrument(name = "Deleting post from PostgreSQL", skip_all)]
    async fn delete_post(&self, id: PostId, owner: UserId) -> Result<(), PostStoreError> {
        // Image rows carry no cascade; they go in the same transaction.
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let owned = sqlx::query("SELECT 1 FROM posts WHERE id = $1 AND created_by = $2")
            .bind(id.0)
            .bind(owner.0)
            .fetch_optional(&mut *tx)
            .await
            .map_err(unexpected)?;
        if owned.is_none() {
            return Err(PostStoreError::PostNotFound);
        }

        sqlx::query("DELETE FROM images WHERE post_id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

        tx.commit().await.map_err(unexpected)?;
        Ok(())
    }

    #[tracing::instrument(name = "Listing owned posts from PostgreSQL", skip_all)]
    async fn posts_by_owner(
        &self,
        owner: UserId,
        filter: &PostFilter,
    ) -> Result<Vec<Post>, PostStoreError> {
        self.fetch_filtered(Some(owner), filter).await
    }

    #[tracing::instrument(name = "Searching posts in PostgreSQL", skip_all)]
    async fn find_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, PostStoreError> {
        self.fetch_filtered(None, filter).await
    }

    #[tracing::instrument(name = "Counting owned posts in PostgreSQL", skip_all)]
    async fn count_by_owner(&self, owner: UserId) -> Result<i64, PostStoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM posts WHERE created_by = $1")
            .bind(owner.0)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        row.try_get("count").map_err(unexpected)
    }

    #[tracing::instrument(name = "Indexing uploaded files in PostgreSQL", skip_all, fields(count = images.len()))]
    async fn add_images(&self, post: PostId, images: &[ImageMeta]) -> Result<(), PostStoreError> {
        for image in images {
            image
                .validate()
                .map_err(PostStoreError::ImagePersistFailed)?;
        }

        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        for image in images {
            sqlx::query(
                r#"
                    INSERT INTO images (location, filename, size, content_type, post_id)
                    VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(&image.location)
            .bind(&image.filename)
            .bind(image.size)
            .bind(&image.content_type)
            .bind(post.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| PostStoreError::ImagePersistFailed(e.to_string()))?;
        }
        tx.commit().await.map_err(unexpected)?;

        Ok(())
    }
}
