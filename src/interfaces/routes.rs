use actix_web::web;

use crate::{
    handlers::{auth, images, posts},
    middlewares::auth::SessionGate,
};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(auth::login)
            .service(auth::logout)
            .service(auth::me)
            .service(posts::published_posts)
            .service(
                web::scope("/admin")
                    .wrap(SessionGate)
                    .service(posts::create_post)
                    .service(posts::list_posts)
                    .service(posts::get_post)
                    .service(posts::update_status)
                    .service(posts::update_display_time)
                    .service(posts::delete_post)
                    .service(images::upload_images)
                    .service(images::attach_images)
            )
    );
}
