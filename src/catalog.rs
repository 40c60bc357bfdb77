//! The chapter catalog and built-in fallback verses.
//!
//! The catalog is the one process-wide list of chapters: number, plain Arabic
//! name and verse count, in mushaf order. Distractors are sampled from it and
//! random verses are picked against its verse counts.

use crate::arabic::{matches, normalize};
use crate::content::RemoteChapter;
use crate::domain::{Ayah, Chapter};
use crate::options::RandomSource;

pub const CHAPTER_COUNT: usize = 114;

const fn ch(number: u16, name: &'static str, verse_count: u16) -> Chapter {
  Chapter { number, name, verse_count }
}

pub static CHAPTERS: [Chapter; CHAPTER_COUNT] = [
  ch(1, "الفاتحة", 7),
  ch(2, "البقرة", 286),
  ch(3, "آل عمران", 200),
  ch(4, "النساء", 176),
  ch(5, "المائدة", 120),
  ch(6, "الأنعام", 165),
  ch(7, "الأعراف", 206),
  ch(8, "الأنفال", 75),
  ch(9, "التوبة", 129),
  ch(10, "يونس", 109),
  ch(11, "هود", 123),
  ch(12, "يوسف", 111),
  ch(13, "الرعد", 43),
  ch(14, "إبراهيم", 52),
  ch(15, "الحجر", 99),
  ch(16, "النحل", 128),
  ch(17, "الإسراء", 111),
  ch(18, "الكهف", 110),
  ch(19, "مريم", 98),
  ch(20, "طه", 135),
  ch(21, "الأنبياء", 112),
  ch(22, "الحج", 78),
  ch(23, "المؤمنون", 118),
  ch(24, "النور", 64),
  ch(25, "الفرقان", 77),
  ch(26, "الشعراء", 227),
  ch(27, "النمل", 93),
  ch(28, "القصص", 88),
  ch(29, "العنكبوت", 69),
  ch(30, "الروم", 60),
  ch(31, "لقمان", 34),
  ch(32, "السجدة", 30),
  ch(33, "الأحزاب", 73),
  ch(34, "سبأ", 54),
  ch(35, "فاطر", 45),
  ch(36, "يس", 83),
  ch(37, "الصافات", 182),
  ch(38, "ص", 88),
  ch(39, "الزمر", 75),
  ch(40, "غافر", 85),
  ch(41, "فصلت", 54),
  ch(42, "الشورى", 53),
  ch(43, "الزخرف", 89),
  ch(44, "الدخان", 59),
  ch(45, "الجاثية", 37),
  ch(46, "الأحقاف", 35),
  ch(47, "محمد", 38),
  ch(48, "الفتح", 29),
  ch(49, "الحجرات", 18),
  ch(50, "ق", 45),
  ch(51, "الذاريات", 60),
  ch(52, "الطور", 49),
  ch(53, "النجم", 62),
  ch(54, "القمر", 55),
  ch(55, "الرحمن", 78),
  ch(56, "الواقعة", 96),
  ch(57, "الحديد", 29),
  ch(58, "المجادلة", 22),
  ch(59, "الحشر", 24),
  ch(60, "الممتحنة", 13),
  ch(61, "الصف", 14),
  ch(62, "الجمعة", 11),
  ch(63, "المنافقون", 11),
  ch(64, "التغابن", 18),
  ch(65, "الطلاق", 12),
  ch(66, "التحريم", 12),
  ch(67, "الملك", 30),
  ch(68, "القلم", 52),
  ch(69, "الحاقة", 52),
  ch(70, "المعارج", 44),
  ch(71, "نوح", 28),
  ch(72, "الجن", 28),
  ch(73, "المزمل", 20),
  ch(74, "المدثر", 56),
  ch(75, "القيامة", 40),
  ch(76, "الإنسان", 31),
  ch(77, "المرسلات", 50),
  ch(78, "النبأ", 40),
  ch(79, "النازعات", 46),
  ch(80, "عبس", 42),
  ch(81, "التكوير", 29),
  ch(82, "الانفطار", 19),
  ch(83, "المطففين", 36),
  ch(84, "الانشقاق", 25),
  ch(85, "البروج", 22),
  ch(86, "الطارق", 17),
  ch(87, "الأعلى", 19),
  ch(88, "الغاشية", 26),
  ch(89, "الفجر", 30),
  ch(90, "البلد", 20),
  ch(91, "الشمس", 15),
  ch(92, "الليل", 21),
  ch(93, "الضحى", 11),
  ch(94, "الشرح", 8),
  ch(95, "التين", 8),
  ch(96, "العلق", 19),
  ch(97, "القدر", 5),
  ch(98, "البينة", 8),
  ch(99, "الزلزلة", 8),
  ch(100, "العاديات", 11),
  ch(101, "القارعة", 11),
  ch(102, "التكاثر", 8),
  ch(103, "العصر", 3),
  ch(104, "الهمزة", 9),
  ch(105, "الفيل", 5),
  ch(106, "قريش", 4),
  ch(107, "الماعون", 7),
  ch(108, "الكوثر", 3),
  ch(109, "الكافرون", 6),
  ch(110, "النصر", 3),
  ch(111, "المسد", 5),
  ch(112, "الإخلاص", 4),
  ch(113, "الفلق", 5),
  ch(114, "الناس", 6),
];

/// Catalog names in order.
pub fn chapter_names() -> Vec<&'static str> {
  CHAPTERS.iter().map(|c| c.name).collect()
}

pub fn by_number(number: u16) -> Option<&'static Chapter> {
  CHAPTERS.iter().find(|c| c.number == number)
}

/// Resolve any spelling of a chapter name (API form, prefixed, with tashkeel).
pub fn find_by_name(name: &str) -> Option<&'static Chapter> {
  let wanted = normalize(name);
  if wanted.is_empty() {
    return None;
  }
  CHAPTERS.iter().find(|c| matches(c.name, &wanted))
}

/// Uniform chapter, then a uniform verse within it: `(surah, ayah)`, both 1-based.
pub fn random_verse_ref<R: RandomSource + ?Sized>(rng: &mut R) -> (u16, u16) {
  let chapter = &CHAPTERS[rng.next_index(CHAPTER_COUNT)];
  let ayah = rng.next_index(chapter.verse_count as usize) as u16 + 1;
  (chapter.number, ayah)
}

/// Difference between the catalog and the chapter list the content API reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogMismatch {
  MissingRemotely { number: u16 },
  UnknownNumber { number: u16 },
  Name { number: u16, local: &'static str, remote: String },
  VerseCount { number: u16, local: u16, remote: u16 },
}

/// Compare the built-in catalog with an authoritative chapter list.
/// Names are compared through the normalizer, so tashkeel and prefixes don't count.
pub fn validate_against(remote: &[RemoteChapter]) -> Vec<CatalogMismatch> {
  let mut out = vec![];

  for r in remote {
    let Some(local) = by_number(r.number) else {
      out.push(CatalogMismatch::UnknownNumber { number: r.number });
      continue;
    };
    if !matches(local.name, &r.name) {
      out.push(CatalogMismatch::Name { number: r.number, local: local.name, remote: r.name.clone() });
    }
    if local.verse_count != r.number_of_ayahs {
      out.push(CatalogMismatch::VerseCount { number: r.number, local: local.verse_count, remote: r.number_of_ayahs });
    }
  }

  for c in CHAPTERS.iter() {
    if !remote.iter().any(|r| r.number == c.number) {
      out.push(CatalogMismatch::MissingRemotely { number: c.number });
    }
  }
  out
}

/// Built-in verses served when the content API is unavailable, so the quiz
/// keeps working offline.
pub fn fallback_ayat() -> Vec<Ayah> {
  vec![
    fallback(1, 2, 2, "ٱلْحَمْدُ لِلَّهِ رَبِّ ٱلْعَٰلَمِينَ", "Al-Faatiha", 1, 1),
    fallback(103, 1, 6177, "وَٱلْعَصْرِ", "Al-Asr", 30, 601),
    fallback(108, 1, 6205, "إِنَّآ أَعْطَيْنَٰكَ ٱلْكَوْثَرَ", "Al-Kawthar", 30, 602),
    fallback(112, 1, 6222, "قُلْ هُوَ ٱللَّهُ أَحَدٌ", "Al-Ikhlaas", 30, 604),
    fallback(113, 1, 6226, "قُلْ أَعُوذُ بِرَبِّ ٱلْفَلَقِ", "Al-Falaq", 30, 604),
    fallback(114, 1, 6231, "قُلْ أَعُوذُ بِرَبِّ ٱلنَّاسِ", "An-Naas", 30, 604),
  ]
}

fn fallback(surah: u16, ayah: u16, global: u32, text: &str, english: &str, juz: u16, page: u16) -> Ayah {
  Ayah {
    text: text.into(),
    surah_number: surah,
    number_in_surah: ayah,
    global_number: global,
    surah_english: english.into(),
    audio: Some(format!("https://cdn.islamic.network/quran/audio/128/ar.alafasy/{}.mp3", global)),
    juz: Some(juz),
    page: Some(page),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  fn remote(number: u16, name: &str, ayahs: u16) -> RemoteChapter {
    RemoteChapter { number, name: name.into(), english_name: String::new(), number_of_ayahs: ayahs }
  }

  #[test]
  fn catalog_is_complete_and_ordered() {
    assert_eq!(CHAPTERS.len(), 114);
    for (i, c) in CHAPTERS.iter().enumerate() {
      assert_eq!(c.number as usize, i + 1);
      assert!(c.verse_count > 0);
    }
    let total: u32 = CHAPTERS.iter().map(|c| c.verse_count as u32).sum();
    assert_eq!(total, 6236);
  }

  #[test]
  fn normalized_names_are_distinct() {
    let set: HashSet<String> = CHAPTERS.iter().map(|c| normalize(c.name)).collect();
    assert_eq!(set.len(), CHAPTER_COUNT);
  }

  #[test]
  fn lookup_by_any_spelling() {
    assert_eq!(find_by_name("سُورَةُ ٱلنُّورِ").map(|c| c.number), Some(24));
    assert_eq!(find_by_name("سورة الاسراء").map(|c| c.number), Some(17));
    assert_eq!(find_by_name("no such chapter"), None);
    assert_eq!(find_by_name(""), None);
    assert_eq!(by_number(114).map(|c| c.name), Some("الناس"));
    assert!(by_number(0).is_none());
  }

  #[test]
  fn validation_accepts_matching_list_in_api_spelling() {
    let mut list: Vec<RemoteChapter> = CHAPTERS.iter().map(|c| remote(c.number, c.name, c.verse_count)).collect();
    list[0] = remote(1, "سُورَةُ ٱلْفَاتِحَةِ", 7);
    assert!(validate_against(&list).is_empty());
  }

  #[test]
  fn validation_reports_each_kind_of_mismatch() {
    let mut list: Vec<RemoteChapter> = CHAPTERS.iter().map(|c| remote(c.number, c.name, c.verse_count)).collect();
    list.retain(|r| r.number != 24);
    list[1] = remote(2, "البقرة", 285);
    list[2] = remote(3, "النساء", 200);
    list.push(remote(115, "x", 1));

    let found = validate_against(&list);
    assert!(found.contains(&CatalogMismatch::MissingRemotely { number: 24 }));
    assert!(found.contains(&CatalogMismatch::VerseCount { number: 2, local: 286, remote: 285 }));
    assert!(found.contains(&CatalogMismatch::Name { number: 3, local: "آل عمران", remote: "النساء".into() }));
    assert!(found.contains(&CatalogMismatch::UnknownNumber { number: 115 }));
    assert_eq!(found.len(), 4);
  }

  #[test]
  fn random_refs_stay_in_range() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..2000 {
      let (surah, ayah) = random_verse_ref(&mut rng);
      let c = by_number(surah).expect("chapter");
      assert!(ayah >= 1 && ayah <= c.verse_count, "{surah}:{ayah}");
    }
  }

  #[test]
  fn fallback_verses_point_at_catalog_chapters() {
    for a in fallback_ayat() {
      let c = by_number(a.surah_number).expect("chapter");
      assert!(a.number_in_surah >= 1 && a.number_in_surah <= c.verse_count);
      assert!(!a.text.is_empty());
    }
  }
}
