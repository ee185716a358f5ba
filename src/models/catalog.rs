use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Статические данные страницы бронирования: кинотеатры, залы и сеансы.
/// Загружаются один раз при старте и дальше не меняются.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cinema {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screen {
    pub id: i64,
    #[serde(rename = "cinemaId")]
    pub cinema_id: i64,
    pub name: String,
    #[serde(rename = "rowsCount")]
    pub rows_count: u32,
    #[serde(rename = "colsCount")]
    pub cols_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Showtime {
    #[serde(rename = "cinemaId")]
    pub cinema_id: i64,
    #[serde(rename = "screenId")]
    pub screen_id: i64,
    /// Время начала сеанса в формате "HH:MM" — едет в запрос как есть.
    pub time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub cinemas: Vec<Cinema>,
    pub screens: Vec<Screen>,
    pub showtimes: Vec<Showtime>,
}

impl Catalog {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn screen(&self, id: i64) -> Option<&Screen> {
        self.screens.iter().find(|s| s.id == id)
    }

    pub fn screens_for(&self, cinema_id: i64) -> Vec<&Screen> {
        self.screens
            .iter()
            .filter(|s| s.cinema_id == cinema_id)
            .collect()
    }

    pub fn times_for(&self, cinema_id: i64, screen_id: i64) -> Vec<&Showtime> {
        self.showtimes
            .iter()
            .filter(|s| s.cinema_id == cinema_id && s.screen_id == screen_id)
            .collect()
    }

    /// Встроенный демо-каталог на случай, когда CATALOG_PATH не задан.
    pub fn demo() -> Self {
        Catalog {
            cinemas: vec![
                Cinema { id: 1, name: "Downtown Multiplex".to_string() },
                Cinema { id: 2, name: "Lakeside Cinema".to_string() },
            ],
            screens: vec![
                Screen {
                    id: 1,
                    cinema_id: 1,
                    name: "Screen 1".to_string(),
                    rows_count: 8,
                    cols_count: 10,
                },
                Screen {
                    id: 2,
                    cinema_id: 1,
                    name: "Screen 2".to_string(),
                    rows_count: 7,
                    cols_count: 9,
                },
            ],
            showtimes: vec![
                Showtime { cinema_id: 1, screen_id: 1, time: "14:00".to_string() },
                Showtime { cinema_id: 1, screen_id: 1, time: "18:30".to_string() },
                Showtime { cinema_id: 1, screen_id: 2, time: "20:00".to_string() },
            ],
        }
    }
}

/// Идентичность "текущего сеанса": любое изменение компонента
/// инвалидирует выбранные и занятые места.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowingKey {
    #[serde(rename = "cinemaId")]
    pub cinema_id: i64,
    #[serde(rename = "screenId")]
    pub screen_id: i64,
    pub date: NaiveDate,
    pub time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::demo()
    }

    #[test]
    fn screens_filtered_by_cinema() {
        let c = catalog();
        let ids: Vec<i64> = c.screens_for(1).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(c.screens_for(2).is_empty());
    }

    #[test]
    fn times_require_both_cinema_and_screen() {
        let c = catalog();
        assert_eq!(c.times_for(1, 1).len(), 2);
        assert_eq!(c.times_for(1, 2).len(), 1);
        assert!(c.times_for(2, 1).is_empty());
    }

    #[test]
    fn catalog_parses_from_json() {
        let raw = r#"{
            "cinemas": [{"id": 5, "name": "Plaza"}],
            "screens": [{"id": 9, "cinemaId": 5, "name": "Main", "rowsCount": 3, "colsCount": 4}],
            "showtimes": [{"cinemaId": 5, "screenId": 9, "time": "12:15"}]
        }"#;
        let c = Catalog::from_json(raw).unwrap();
        assert_eq!(c.screen(9).unwrap().rows_count, 3);
        assert_eq!(c.times_for(5, 9)[0].time, "12:15");
    }
}
