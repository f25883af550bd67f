//! Display names for lunar dates.

/// 天干, indexed by `(year - 4) mod 10`
pub const HEAVENLY_STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

/// 地支, indexed by `(year - 4) mod 12`
pub const EARTHLY_BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// 生肖, sharing the branch index
pub const ZODIAC_ANIMALS: [&str; 12] = [
    "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪",
];

/// Month names, months 11 and 12 are 冬月 and 腊月
pub const MONTH_NAMES: [&str; 12] = [
    "正月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "冬月", "腊月",
];

/// Day names for days 1..=30
pub const DAY_NAMES: [&str; 30] = [
    "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十",
    "十一", "十二", "十三", "十四", "十五", "十六", "十七", "十八", "十九", "二十",
    "廿一", "廿二", "廿三", "廿四", "廿五", "廿六", "廿七", "廿八", "廿九", "三十",
];

/// The 24 solar terms in Gregorian calendar order, starting from 小寒
pub const SOLAR_TERMS: [&str; 24] = [
    "小寒", "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至",
    "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至",
];

fn cycle_index(year: i32, len: usize) -> usize {
    // Table lengths are 10 and 12, the result always fits
    (year - 4).rem_euclid(len as i32) as usize
}

/// 天干 of a lunar year.
pub fn stem(year: i32) -> &'static str {
    HEAVENLY_STEMS[cycle_index(year, HEAVENLY_STEMS.len())]
}

/// 地支 of a lunar year.
pub fn branch(year: i32) -> &'static str {
    EARTHLY_BRANCHES[cycle_index(year, EARTHLY_BRANCHES.len())]
}

/// 生肖 of a lunar year.
pub fn zodiac(year: i32) -> &'static str {
    ZODIAC_ANIMALS[cycle_index(year, ZODIAC_ANIMALS.len())]
}

/// Sexagenary label with the zodiac animal, e.g. `甲辰年(龙)`.
///
/// # Examples
///
/// ```
/// use lunisolar::names;
///
/// assert_eq!("甲辰年(龙)", names::year_label(2024));
/// assert_eq!("庚子年(鼠)", names::year_label(1900));
/// ```
pub fn year_label(year: i32) -> String {
    format!("{}{}年({})", stem(year), branch(year), zodiac(year))
}

/// Name of ordinal month `month`, `None` outside `1..=12`.
pub fn month_name(month: u8) -> Option<&'static str> {
    MONTH_NAMES.get(usize::from(month).checked_sub(1)?).copied()
}

/// Name of day `day`, `None` outside `1..=30`.
pub fn day_name(day: u8) -> Option<&'static str> {
    DAY_NAMES.get(usize::from(day).checked_sub(1)?).copied()
}
