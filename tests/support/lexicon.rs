use message_composer::{Category, Lexicon};

/// The small lexicon used throughout the integration tests.
pub fn sample() -> Lexicon {
    Lexicon::from_sources(
        "你好*****\n加油\n小心*****\n*****与*****",
        "但是\n，\n所以\n而且",
        [
            (Category::Items, "武器\n盔甲"),
            (Category::Enemies, "龙\n骑士\n巨人"),
            (Category::Tactics, "翻滚"),
        ],
    )
    .unwrap()
}

/// Same entries as [`sample`] with the template list in a different order.
pub fn reordered() -> Lexicon {
    Lexicon::from_sources(
        "加油\n你好*****\n小心*****\n*****与*****",
        "但是\n，\n所以\n而且",
        [
            (Category::Items, "武器\n盔甲"),
            (Category::Enemies, "龙\n骑士\n巨人"),
            (Category::Tactics, "翻滚"),
        ],
    )
    .unwrap()
}
