//! Fire-and-forget loaders for the static resources served next to the bundle.
//! Each returns a `GlobeError` the caller logs; nothing is retried.

use globe_core::cities::{parse_cities, CityLabel};
use globe_core::countries::{parse_countries, CountryPolygon};
use globe_core::model::buffer_url;
use globe_core::{GlobeError, SceneNode};
use gloo_net::http::{Request, Response};

/// Decoded RGBA8 image ready for upload.
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

async fn get(url: &str) -> Result<Response, GlobeError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| GlobeError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;
    if !resp.ok() {
        return Err(GlobeError::HttpStatus {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    Ok(resp)
}

async fn get_text(url: &str) -> Result<String, GlobeError> {
    get(url).await?.text().await.map_err(|e| GlobeError::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })
}

async fn get_bytes(url: &str) -> Result<Vec<u8>, GlobeError> {
    get(url).await?.binary().await.map_err(|e| GlobeError::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })
}

pub async fn load_cities(url: &str) -> Result<Vec<CityLabel>, GlobeError> {
    parse_cities(&get_text(url).await?)
}

pub async fn load_countries(url: &str) -> Result<Vec<CountryPolygon>, GlobeError> {
    parse_countries(&get_text(url).await?)
}

/// Fetch a glTF model and every buffer it references. `.glb` chunks and
/// external `.bin` files are both supported; relative URIs resolve against `url`.
pub async fn load_model(url: &str) -> Result<SceneNode, GlobeError> {
    let gltf = gltf::Gltf::from_slice(&get_bytes(url).await?)?;
    let (document, mut blob) = (gltf.document, gltf.blob);
    let mut buffers = Vec::new();
    for buffer in document.buffers() {
        let data = match buffer.source() {
            gltf::buffer::Source::Bin => blob.take().ok_or(GlobeError::MissingBuffer {
                index: buffer.index(),
            })?,
            gltf::buffer::Source::Uri(uri) => get_bytes(&buffer_url(url, uri)).await?,
        };
        buffers.push(gltf::buffer::Data(data));
    }
    SceneNode::from_gltf_parts(&document, &buffers)
}

pub async fn load_image(url: &str) -> anyhow::Result<RgbaImage> {
    let bytes = get_bytes(url).await?;
    let img = image::load_from_memory(&bytes)?.to_rgba8();
    let (width, height) = img.dimensions();
    Ok(RgbaImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}
