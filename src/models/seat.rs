/// Буква ряда для нулевого индекса: 0 -> 'A', 1 -> 'B', ... 25 -> 'Z'.
///
/// Сетка зала никогда не превышает 26 рядов; индекс за пределами — ошибка
/// данных каталога, а не повод для паники.
pub fn row_letter(index: u32) -> Option<char> {
    if index < 26 {
        char::from_u32(u32::from(b'A') + index)
    } else {
        None
    }
}

/// Метка места: буква ряда + номер кресла (1-based), например "B7".
pub fn seat_label(row: u32, col: u32) -> Option<String> {
    row_letter(row).map(|letter| format!("{}{}", letter, col + 1))
}
