//! Built-in registry, rules and policy notes

use std::collections::BTreeMap;

pub(crate) fn trusted_sources() -> BTreeMap<String, Vec<String>> {
    let mut sources = BTreeMap::new();
    sources.insert(
        "official_docs".to_string(),
        vec![
            "https://python.langchain.com".to_string(),
            "https://docs.llamaindex.ai".to_string(),
            "https://platform.openai.com/docs".to_string(),
            "https://docs.anthropic.com".to_string(),
        ],
    );
    sources.insert(
        "reputable_repos".to_string(),
        vec![
            "https://github.com/langchain-ai/langchain".to_string(),
            "https://github.com/run-llama/llama_index".to_string(),
            "https://github.com/huggingface/transformers".to_string(),
        ],
    );
    sources
}

pub(crate) fn pattern_rules() -> Vec<String> {
    vec![
        r"quantum.*consciousness".to_string(),
        r"agi.*integration".to_string(),
        r"parallel.*universe".to_string(),
        r"202[6-9].*breakthrough".to_string(),
    ]
}

pub(crate) fn source_policy() -> Vec<String> {
    vec![
        "Must have official documentation".to_string(),
        "Must be from reputable organization".to_string(),
        "Must have version control/GitHub".to_string(),
        "Must have community validation".to_string(),
    ]
}

pub(crate) fn content_policy() -> Vec<String> {
    vec![
        "No fictional technologies".to_string(),
        "No made-up product names".to_string(),
        "No unverified claims".to_string(),
        "Must have implementation examples".to_string(),
    ]
}
