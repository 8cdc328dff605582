//! # Blog Endpoints
//!
//! Blog posts are created and updated as multipart forms: the post fields go
//! in a JSON `data` part, the cover image in an optional `image` part.

use shared::dto::blog::{Blog, BlogInput};
use shared::dto::envelope::{ListPage, MutationResponse};

use crate::core::error::ApiError;
use crate::services::api::args::Args;
use crate::services::api::endpoint::{BodyEncoding, Endpoint, Tag};
use crate::services::api::query::QueryHandle;
use crate::services::api::registry::{Registry, Resource};
use crate::services::api::request::{FilePart, HttpMethod, MultipartBody, RequestBody};

pub const GROUP: &str = "blog";

pub static ENDPOINTS: &[Endpoint] = &[
    Endpoint::query("getBlogs", "/blog/all-blogs").provides(&[Tag::Blogs]),
    Endpoint::query("getBlogById", "/blog/get-details/{id}").provides(&[Tag::Blogs]),
    Endpoint::mutation("createBlog", HttpMethod::Post, "/blog/create-blog", BodyEncoding::Multipart)
        .invalidates(&[Tag::Blogs]),
    Endpoint::mutation("updateBlog", HttpMethod::Put, "/blog/update-blog/{id}", BodyEncoding::Multipart)
        .invalidates(&[Tag::Blogs]),
    Endpoint::mutation("deleteBlog", HttpMethod::Delete, "/blog/delete-blog/{id}", BodyEncoding::None)
        .invalidates(&[Tag::Blogs]),
];

#[derive(Debug, Clone)]
pub struct BlogApi {
    resource: Resource,
}

impl BlogApi {
    pub fn register(registry: &Registry) -> Result<Self, ApiError> {
        Ok(Self {
            resource: registry.register_resource(GROUP, ENDPOINTS)?,
        })
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn blogs(&self) -> Result<QueryHandle, ApiError> {
        self.resource.query("getBlogs", &Args::new())
    }

    pub async fn fetch_blogs(&self) -> Result<ListPage<Blog>, ApiError> {
        self.resource.fetch_list("getBlogs", &Args::new()).await
    }

    pub fn blog(&self, id: &str) -> Result<QueryHandle, ApiError> {
        self.resource.query("getBlogById", &Args::id(id))
    }

    pub async fn fetch_blog(&self, id: &str) -> Result<Blog, ApiError> {
        self.resource.fetch_data("getBlogById", &Args::id(id)).await
    }

    pub async fn create_blog(&self, input: &BlogInput, image: Option<FilePart>) -> Result<MutationResponse, ApiError> {
        let body = MultipartBody::new(input)?.with_optional_image(image);
        self.resource
            .mutation("createBlog")?
            .trigger(&Args::new(), RequestBody::from(body))
            .await
    }

    /// Replace a post. The current image is kept when `image` is `None`.
    pub async fn update_blog(
        &self,
        id: &str,
        input: &BlogInput,
        image: Option<FilePart>,
    ) -> Result<MutationResponse, ApiError> {
        let body = MultipartBody::new(input)?.with_optional_image(image);
        self.resource
            .mutation("updateBlog")?
            .trigger(&Args::id(id), RequestBody::from(body))
            .await
    }

    pub async fn delete_blog(&self, id: &str) -> Result<MutationResponse, ApiError> {
        self.resource
            .mutation("deleteBlog")?
            .trigger(&Args::id(id), RequestBody::Empty)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::cache::QueryCache;
    use crate::services::api::testing::MockTransport;
    use serde_json::json;

    fn blog_list() -> serde_json::Value {
        json!({
            "success": true,
            "data": {
                "result": [{ "_id": "b1", "title": "Spring cleaning", "description": "Tips", "image": "/uploads/b1.png" }],
                "meta": { "page": 1, "limit": 10, "total": 1 }
            }
        })
    }

    #[tokio::test]
    async fn test_create_blog_without_image() {
        let transport = MockTransport::new(|request| match request.endpoint {
            "createBlog" => Ok(json!({ "success": true, "message": "Blog created" })),
            _ => Ok(blog_list()),
        });
        let api = BlogApi::register(&Registry::new(QueryCache::new(transport.clone()))).unwrap();
        let input = BlogInput {
            title: "A".to_string(),
            description: "B".to_string(),
        };

        api.create_blog(&input, None).await.unwrap();

        let calls = transport.calls();
        let body = calls[0].body.as_multipart().unwrap();
        assert_eq!(body.field_names(), vec!["data"]);
        assert_eq!(body.data_field(), r#"{"title":"A","description":"B"}"#);
    }

    #[tokio::test]
    async fn test_update_blog_refreshes_list() {
        let transport = MockTransport::new(|request| match request.endpoint {
            "updateBlog" => Ok(json!({ "success": true, "message": "Blog updated" })),
            _ => Ok(blog_list()),
        });
        let api = BlogApi::register(&Registry::new(QueryCache::new(transport.clone()))).unwrap();
        let mut list = api.blogs().unwrap();
        list.settled().await;
        let input = BlogInput {
            title: "Spring cleaning".to_string(),
            description: "Updated tips".to_string(),
        };
        let image = FilePart::new("cover.png", vec![0x89, 0x50, 0x4e, 0x47]);

        api.update_blog("b1", &input, Some(image)).await.unwrap();
        list.settled().await;

        let calls = transport.calls();
        assert_eq!(calls[1].path, "/blog/update-blog/b1");
        assert_eq!(calls[1].body.as_multipart().unwrap().field_names(), vec!["data", "image"]);
        assert_eq!(transport.call_count("getBlogs"), 2);
        let page = list.decode_list::<Blog>().unwrap().unwrap();
        assert_eq!(page.items[0].title, "Spring cleaning");
    }

    #[tokio::test]
    async fn test_fetch_blog_by_id() {
        let transport = MockTransport::new(|_| {
            Ok(json!({ "success": true, "data": { "_id": "b1", "title": "Spring cleaning", "description": "Tips" } }))
        });
        let api = BlogApi::register(&Registry::new(QueryCache::new(transport.clone()))).unwrap();

        let blog = api.fetch_blog("b1").await.unwrap();

        assert_eq!(blog.id.as_str(), "b1");
        assert_eq!(transport.calls()[0].path, "/blog/get-details/b1");
        assert!(api.fetch_blog(" ").await.is_err());
    }
}
