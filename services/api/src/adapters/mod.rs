pub mod text_llm;

pub use text_llm::OpenAiTextAdapter;
