/// DOM element ids and keyboard tuning for the web front-end.
///
/// Kept free of web-sys types so host tests can `include!` it.
pub const CANVAS_ID: &str = "app-canvas";
pub const CONFIG_SCRIPT_ID: &str = "nebula-config";
pub const LOADING_ID: &str = "loading";
pub const INFO_ID: &str = "info";
pub const PARTICLE_COUNT_ID: &str = "particle-count";
pub const FPS_ID: &str = "fps";

// Seconds between FPS readout refreshes
pub const FPS_REFRESH_SEC: f32 = 0.5;

// Curl strength: `[` / `]`
pub const CURL_STRENGTH_STEP: f32 = 0.1;
pub const CURL_STRENGTH_MIN: f32 = 0.5;
pub const CURL_STRENGTH_MAX: f32 = 5.0;

// Particle size: `-` / `=`
pub const PARTICLE_SIZE_STEP: f32 = 0.1;
pub const PARTICLE_SIZE_MIN: f32 = 1.0;
pub const PARTICLE_SIZE_MAX: f32 = 20.0;

// Noise scale: `,` / `.`
pub const NOISE_SCALE_STEP: f32 = 0.01;
pub const NOISE_SCALE_MIN: f32 = 0.05;
pub const NOISE_SCALE_MAX: f32 = 0.5;

