use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use blackjack_arcade::controllers::admin_auth;
use blackjack_arcade::controllers::admin_browse;
use blackjack_arcade::controllers::leaderboard;
use blackjack_arcade::controllers::pages;
use blackjack_arcade::controllers::rounds;
use blackjack_arcade::controllers::visitor;
use blackjack_arcade::core::auth;
use blackjack_arcade::core::config::CONFIG;
use blackjack_arcade::core::database::{sqlite_operations, visitor_operations};
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};

#[tokio::main]
async fn main() {
    dotenv().ok();
    pretty_env_logger::init();

    // boot data: schema, visitor singleton, default admin account
    let conn = sqlite_operations::connection();
    sqlite_operations::ensure_schema(&conn).expect("Error preparing database schema!");
    visitor_operations::ensure_visitor_row(&conn).expect("Error seeding visitor counter!");
    auth::seed_default_admin(&conn).expect("Error seeding default admin!");
    drop(conn);

    let app = Router::new()
        .route("/api/visitor", get(visitor::get_visitor))
        .route("/api/visitor/hit", post(visitor::hit_visitor))
        .route("/api/admin/login", post(admin_auth::login))
        .route("/api/admin/logout", post(admin_auth::logout))
        .route("/api/admin/players", get(admin_browse::list_players))
        .route("/api/admin/rounds", get(admin_browse::list_rounds))
        .route(
            "/api/rounds",
            get(rounds::recent_rounds).post(rounds::record_round),
        )
        .route("/api/leaderboard", get(leaderboard::leaderboard))
        .route("/admin", get(pages::console))
        .route("/admin/login", post(pages::console_login))
        .route("/admin/logout", post(pages::console_logout))
        .layer(cors_layer());

    let address = format!("0.0.0.0:{}", CONFIG.port);
    let listener = TcpListener::bind(&address)
        .await
        .expect("Error binding listen address!");
    println!("Server listening on http://localhost:{}", CONFIG.port);
    axum::serve(listener, app).await.expect("Server error!");
}

fn cors_layer() -> CorsLayer {
    let origin = match CONFIG.allow_origin.as_str() {
        "*" => AllowOrigin::mirror_request(),
        exact => AllowOrigin::exact(
            exact
                .parse::<HeaderValue>()
                .expect("Invalid ALLOW_ORIGIN value!"),
        ),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}
