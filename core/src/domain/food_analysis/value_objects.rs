/// Largest accepted image, 10 MiB.
pub const MAX_IMAGE_SIZE: u64 = 10 * 1024 * 1024;

/// Sampling parameters sent with every analysis request. Kept low-temperature
/// so the model sticks to the structured output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.8,
            max_output_tokens: 2048,
        }
    }
}
