// Shared animation/shading tuning constants used by the CPU model and mirrored
// in `shaders/particles.wgsl`.

// Curl noise
pub const CURL_EPSILON: f32 = 0.1; // central-difference step
pub const CURL_TIME_SCALE: f32 = 0.3; // time offset added to every curl sample axis

// Diagonal wave projection axis
pub const DIAGONAL_X: f32 = 0.7;
pub const DIAGONAL_Z: f32 = -0.5;

// Mouse repulsion
pub const OUTWARD_PUSH_RATIO: f32 = 0.3; // planar push relative to the vertical bump
pub const MIN_INFLUENCE_RADIUS: f32 = 1e-4; // radii below this disable the falloff

// Fragment footprint
pub const FOOTPRINT_RADIUS: f32 = 0.5; // normalized distance beyond which fragments are discarded
pub const FOOTPRINT_SHARPNESS: f32 = 1.5; // exponent applied to the soft-circle falloff
pub const EMISSIVE_BOOST: f32 = 3.0;

// Color ramp stop positions (first and last are implicit 0 and 1)
pub const RAMP_STOP_LOW: f32 = 0.3;
pub const RAMP_STOP_HIGH: f32 = 0.7;

// Curl-mode gradient
pub const CURL_GRADIENT_WEIGHT: f32 = 0.3; // blend of |curl| into the height gradient
pub const CURL_COLOR_LIFT: f32 = 0.2; // |curl| added to the final color

// Per-particle size variation, uniform in [MIN, MAX)
pub const SIZE_SCALE_MIN: f32 = 0.8;
pub const SIZE_SCALE_MAX: f32 = 1.4;

// Point size: pixel size equals the base size at this view depth
pub const POINT_SIZE_DEPTH_REF: f32 = 30.0;
pub const MAX_PIXEL_RATIO: f32 = 2.0;

// Pointer
pub const POINTER_SENTINEL: f32 = 999.0; // off-screen NDC coordinate meaning "inactive"
pub const POINTER_SMOOTHING: f32 = 0.15;
pub const POINTER_RADIUS: f32 = 8.0;
pub const POINTER_STRENGTH: f32 = 5.0;
pub const RAY_PLANE_EPSILON: f32 = 1e-6;

// Frame timing
pub const MAX_FRAME_DT: f32 = 0.1; // seconds; clamps long stalls to one short step
