mod synthesizer;

pub use synthesizer::LambdaSynthesizer;
