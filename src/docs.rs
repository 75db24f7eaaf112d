use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::video::handler::process_video,
        crate::modules::video::handler::list_videos,
        crate::modules::video::handler::get_video,
        crate::modules::video::handler::create_upload_url,
    ),
    components(
        schemas(
            crate::modules::video::dto::PubSubEnvelope,
            crate::modules::video::dto::PubSubMessage,
            crate::modules::video::dto::UploadUrlRequest,
            crate::modules::video::dto::UploadUrlResponse,
            crate::modules::video::model::Video,
            crate::modules::video::model::VideoStatus,
        )
    ),
    tags(
        (name = "Videos", description = "Video transcoding pipeline")
    )
)]
pub struct ApiDoc;
