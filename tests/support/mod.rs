use cfg_enumerate::Language;

pub fn language(source: &str) -> Language {
    match Language::try_parse(source) {
        Ok(language) => language,
        Err(errors) => panic!("grammar failed to build: {:?}", errors),
    }
}

pub fn first_sentences(source: &str, count: usize) -> Vec<String> {
    language(source).sentences().take(count).collect()
}
