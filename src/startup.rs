use std::net::TcpListener;

use actix_cors::Cors;
use actix_web::{
    dev::Server,
    middleware::Logger,
    web::{self, Data},
    App, HttpServer,
};

use crate::{
    configuration::WebdriverSettings,
    routes::{message_route, scrape_route},
    services::RateGuard,
};

pub fn run(
    listener: TcpListener,
    webdriver: WebdriverSettings,
    rate_guard: RateGuard,
) -> Result<Server, std::io::Error> {
    let webdriver = Data::new(webdriver);
    let rate_guard = Data::new(rate_guard);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(
                web::scope("/api")
                    .service(message_route::message)
                    .service(scrape_route::scrape),
            )
            .app_data(webdriver.clone())
            .app_data(rate_guard.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
