/*!
 * Batch translation of catalog units using AI providers.
 *
 * This module contains the core functionality for translating pending
 * catalog units in numbered batches. It is split into several submodules:
 *
 * - `engine`: Batch orchestration, retry policy and positional reassembly
 * - `decode`: Decoding of numbered batch responses
 * - `prompts`: Prompt templates and builders for batch translation
 */

// Re-export main types for easier usage
pub use self::engine::{BatchEngine, RunReport};
pub use self::decode::decode_batch_response;

// Submodules
pub mod decode;
pub mod engine;
pub mod prompts;
