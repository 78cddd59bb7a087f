use crate::config::ViewportConfig;

/// Canvas zoom level in percent.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: u32,
    config: ViewportConfig,
}

impl Viewport {
    pub fn new(config: ViewportConfig) -> Self {
        let zoom = initial_zoom(&config);
        Self { zoom, config }
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Zoom as a scale factor (`1.0` at 100%).
    pub fn scale(&self) -> f64 {
        f64::from(self.zoom) / 100.0
    }

    pub fn zoom_in(&mut self) -> u32 {
        self.zoom = (self.zoom + self.config.zoom_step).min(self.config.max_zoom);
        self.zoom
    }

    pub fn zoom_out(&mut self) -> u32 {
        self.zoom = self
            .zoom
            .saturating_sub(self.config.zoom_step)
            .max(self.config.min_zoom);
        self.zoom
    }

    pub fn reset(&mut self) -> u32 {
        self.zoom = initial_zoom(&self.config);
        self.zoom
    }
}

fn initial_zoom(config: &ViewportConfig) -> u32 {
    config
        .default_zoom
        .clamp(config.min_zoom, config.max_zoom.max(config.min_zoom))
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}
