use std::collections::{BTreeSet, HashSet};

/// Состояние выбора мест: что выбрал пользователь и что уже занято.
///
/// Инвариант: `selected` и `taken` не пересекаются. Обеспечивается тем, что
/// toggle отказывается трогать занятое место, а при смене сеанса вызывающая
/// сторона обязана сначала сделать clear() (протокол синхронизации).
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
    selected: BTreeSet<String>,
    taken: HashSet<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Переключает место; занятые места игнорируются.
    pub fn toggle(&mut self, seat: &str) {
        if self.taken.contains(seat) {
            return;
        }
        if !self.selected.remove(seat) {
            self.selected.insert(seat.to_string());
        }
    }

    /// Сбрасывает выбор пользователя, занятые места не трогает.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Целиком заменяет набор занятых мест. Не чистит `selected` —
    /// по протоколу clear() уже должен был случиться.
    pub fn set_taken(&mut self, seats: HashSet<String>) {
        self.taken = seats;
    }

    pub fn is_selected(&self, seat: &str) -> bool {
        self.selected.contains(seat)
    }

    pub fn is_taken(&self, seat: &str) -> bool {
        self.taken.contains(seat)
    }

    /// Выбранные места в лексикографическом порядке через ", ".
    /// BTreeSet даёт сортировку сам по себе.
    pub fn serialize(&self) -> String {
        self.selected
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}
