use std::sync::Arc;

use rocket::form::Form;
use rocket::http::ContentType;
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::State;

use crate::api::ApiError;
use crate::block::BlockInstance;
use crate::config::AppConfig;
use crate::feed::FeedFetcher;
use crate::forms::{self, CredentialsForm, DisplayForm};
use crate::models::{Credentials, DisplayConfig, FeedResponse};
use crate::render::{Renderer, BLOCK_CSS};
use crate::store::ConfigStore;

#[get("/block")]
pub async fn get_block(
    fetcher: &State<FeedFetcher>,
    block: &State<BlockInstance>,
    renderer: &State<Box<dyn Renderer>>,
) -> RawHtml<String> {
    let display = block.display();

    // A failed fetch renders an empty block rather than a broken page
    let entries = match fetcher.fetch_for_block(&display).await {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("Rendering empty Instagram block: {}", err);
            Vec::new()
        }
    };

    RawHtml(renderer.render(&entries).to_html())
}

#[get("/feed")]
pub async fn get_feed(
    fetcher: &State<FeedFetcher>,
    block: &State<BlockInstance>,
) -> Result<Json<FeedResponse>, ApiError> {
    let data = fetcher.fetch_for_block(&block.display()).await?;
    Ok(Json(FeedResponse { data }))
}

#[get("/css/block.css")]
pub fn get_stylesheet() -> (ContentType, &'static str) {
    (ContentType::CSS, BLOCK_CSS)
}

#[get("/settings")]
pub fn get_settings(
    store: &State<Arc<dyn ConfigStore>>,
    config: &State<AppConfig>,
) -> Result<RawHtml<String>, ApiError> {
    let credentials = Credentials::load(store.inner().as_ref());
    let authorize_link = config.oauth.authorize_link()?;
    Ok(RawHtml(forms::credentials_page(&credentials, &authorize_link)))
}

#[post("/settings", data = "<form>")]
pub fn save_settings(
    form: Form<CredentialsForm>,
    store: &State<Arc<dyn ConfigStore>>,
) -> Result<Redirect, ApiError> {
    let credentials = Credentials::try_from(form.into_inner())?;
    credentials.persist(store.inner().as_ref())?;

    log::info!("Instagram settings saved for user {}", credentials.user_id);
    Ok(Redirect::to("/instagram/settings"))
}

#[get("/block/settings")]
pub fn get_block_settings(block: &State<BlockInstance>) -> RawHtml<String> {
    RawHtml(forms::display_page(&block.display()))
}

#[post("/block/settings", data = "<form>")]
pub fn save_block_settings(
    form: Form<DisplayForm>,
    block: &State<BlockInstance>,
) -> Result<Redirect, ApiError> {
    let display = DisplayConfig::try_from(form.into_inner())?;
    block.set_display(display);

    log::info!(
        "Instagram block now shows {} image(s) at {}x{}",
        display.count,
        display.width,
        display.height
    );
    Ok(Redirect::to("/instagram/block/settings"))
}
