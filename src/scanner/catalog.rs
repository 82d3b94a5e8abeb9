use crate::strategy::{Category, Strategy};

/// One keyword search in the scan rotation: what to look for, which flip
/// strategy applies, and the price band worth bidding in.
#[derive(Debug, Clone)]
pub struct SearchTask {
    pub keywords: &'static str,
    pub strategy: Strategy,
    pub category: Category,
    pub price_min: f64,
    pub price_max: f64,
}

impl SearchTask {
    fn raw(keywords: &'static str, category: Category, price_min: f64, price_max: f64) -> Self {
        Self {
            keywords,
            strategy: Strategy::RawGrading,
            category,
            price_min,
            price_max,
        }
    }

    fn flip(keywords: &'static str, category: Category, price_min: f64, price_max: f64) -> Self {
        Self {
            keywords,
            strategy: Strategy::QuickFlip,
            category,
            price_min,
            price_max,
        }
    }
}

/// The fixed search rotation every scan walks in order.
pub fn default_catalog() -> Vec<SearchTask> {
    vec![
        // Raw grading candidates, football
        SearchTask::raw("CJ Stroud Prizm Silver RC raw", Category::sport("Football"), 50.0, 100.0),
        SearchTask::raw("Brock Purdy Prizm Silver RC raw", Category::sport("Football"), 50.0, 100.0),
        SearchTask::raw("Anthony Richardson Prizm RC raw", Category::sport("Football"), 50.0, 100.0),
        // Raw grading, baseball
        SearchTask::raw("Bobby Witt Jr Chrome RC raw", Category::sport("Baseball"), 50.0, 100.0),
        SearchTask::raw("Julio Rodriguez Chrome RC raw", Category::sport("Baseball"), 50.0, 100.0),
        SearchTask::raw("Corbin Carroll Chrome RC raw", Category::sport("Baseball"), 50.0, 100.0),
        // Raw grading, Pokemon
        SearchTask::raw("Charizard ex Obsidian Flames raw", Category::tcg("Pokemon"), 50.0, 100.0),
        SearchTask::raw("Umbreon VMAX alt art raw", Category::tcg("Pokemon"), 50.0, 100.0),
        SearchTask::raw("Pikachu VMAX rainbow raw", Category::tcg("Pokemon"), 50.0, 100.0),
        // Raw grading, One Piece
        SearchTask::raw("Luffy OP-05 alt art raw", Category::tcg("One Piece"), 50.0, 100.0),
        SearchTask::raw("Zoro secret rare raw", Category::tcg("One Piece"), 50.0, 100.0),
        // Quick flips on already-graded cards
        SearchTask::flip("PSA 10 Football rookie 2023", Category::sport("Football"), 100.0, 300.0),
        SearchTask::flip("PSA 9 Baseball Chrome rookie", Category::sport("Baseball"), 100.0, 300.0),
        SearchTask::flip("PSA 10 Charizard", Category::tcg("Pokemon"), 100.0, 300.0),
        SearchTask::flip("PSA 10 Luffy One Piece", Category::tcg("One Piece"), 100.0, 300.0),
    ]
}
