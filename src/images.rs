/// Size tokens the image host accepts for episode stills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StillSize {
    W92,
    W185,
    W300,
    Original,
}

impl StillSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            StillSize::W92 => "w92",
            StillSize::W185 => "w185",
            StillSize::W300 => "w300",
            StillSize::Original => "original",
        }
    }
}

/// `{base}/{size}{still_path}`; the provider's paths already start with `/`.
pub fn still_image_url(base: &str, size: StillSize, still_path: &str) -> String {
    let base = base.trim_end_matches('/');
    if still_path.starts_with('/') {
        format!("{}/{}{}", base, size.as_str(), still_path)
    } else {
        format!("{}/{}/{}", base, size.as_str(), still_path)
    }
}
