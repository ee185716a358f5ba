use chrono::NaiveDate;

use crate::models::Catalog;

/// Текущие значения четырёх зависимых полей формы.
/// `None` — это placeholder "ничего не выбрано".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelection {
    pub cinema_id: Option<i64>,
    pub screen_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
}

/// Результат редьюсера: скорректированный выбор плюс допустимые опции
/// для зависимых селекторов.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub selection: FieldSelection,
    pub selectable_screens: Vec<i64>,
    pub selectable_times: Vec<String>,
}

/// Редьюсер цепочки кинотеатр → зал → время.
///
/// Зал допустим, только если принадлежит выбранному кинотеатру; время —
/// только если совпадают и кинотеатр, и зал. Выбор, выпавший из допустимого
/// набора, сбрасывается в None. Без кинотеатра подавляются все залы,
/// без зала — все сеансы.
pub fn apply(catalog: &Catalog, current: &FieldSelection) -> FilterOutcome {
    let mut next = current.clone();

    let selectable_screens: Vec<i64> = match next.cinema_id {
        Some(cinema_id) => catalog
            .screens_for(cinema_id)
            .iter()
            .map(|s| s.id)
            .collect(),
        None => Vec::new(),
    };

    if let Some(screen_id) = next.screen_id {
        if !selectable_screens.contains(&screen_id) {
            next.screen_id = None;
        }
    }

    let selectable_times: Vec<String> = match (next.cinema_id, next.screen_id) {
        (Some(cinema_id), Some(screen_id)) => catalog
            .times_for(cinema_id, screen_id)
            .iter()
            .map(|s| s.time.clone())
            .collect(),
        _ => Vec::new(),
    };

    if let Some(ref time) = next.time {
        if !selectable_times.contains(time) {
            next.time = None;
        }
    }

    FilterOutcome {
        selection: next,
        selectable_screens,
        selectable_times,
    }
}
