use actix_web::{guard, web};

pub mod meals;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
  cfg
    .service(
      web::scope("/users")
        .service(
          web::resource("")
            .route(web::get().to(users::list))
            .route(web::post().to(users::create)),
        )
        .route("/{user_name}", web::get().to(users::profile)),
    )
    .service(
      web::scope("/meals")
        .route("", web::post().to(meals::create))
        // `/meals/{user_name}` and `/meals/{id}` share a pattern, the
        // guard lets non-GET requests fall through to the second one.
        .service(
          web::resource("/{user_name}")
            .guard(guard::Get())
            .to(meals::list),
        )
        .service(
          web::resource("/{id}")
            .route(web::delete().to(meals::delete))
            .route(web::patch().to(meals::update)),
        )
        .route("/{user_name}/meal/{id}", web::get().to(meals::get))
        .route("/{user_name}/summary", web::get().to(meals::summary))
        .route(
          "/{user_name}/summary-in-diet",
          web::get().to(meals::summary_in_diet),
        )
        .route(
          "/{user_name}/metrics-in-diet",
          web::get().to(meals::metrics_in_diet),
        )
        .route(
          "/{user_name}/best-sequence",
          web::get().to(meals::best_sequence),
        ),
    );
}
