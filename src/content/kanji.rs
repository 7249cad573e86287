//! Built-in kanji deck used when no deck file is configured.

use crate::domain::Level;

/// (kanji, reading, meaning, level)
pub const BUILTIN_KANJI: &[(&str, &str, &str, Level)] = &[
  // N5
  ("日", "にち", "day, sun", Level::N5),
  ("月", "げつ", "month, moon", Level::N5),
  ("火", "か", "fire", Level::N5),
  ("水", "すい", "water", Level::N5),
  ("木", "もく", "tree, wood", Level::N5),
  ("金", "きん", "gold, money", Level::N5),
  ("土", "ど", "earth, soil", Level::N5),
  ("山", "さん", "mountain", Level::N5),
  ("川", "かわ", "river", Level::N5),
  ("人", "じん", "person", Level::N5),
  ("大", "だい", "big", Level::N5),
  ("小", "しょう", "small", Level::N5),
  ("上", "じょう", "above, up", Level::N5),
  ("下", "か", "below, down", Level::N5),
  ("中", "ちゅう", "middle, inside", Level::N5),
  ("学", "がく", "study, learning", Level::N5),
  ("生", "せい", "life, birth", Level::N5),
  ("先", "せん", "previous, ahead", Level::N5),
  ("年", "ねん", "year", Level::N5),
  ("雨", "う", "rain", Level::N5),
  // N4
  ("会", "かい", "meeting, association", Level::N4),
  ("同", "どう", "same", Level::N4),
  ("事", "じ", "matter, thing", Level::N4),
  ("自", "じ", "oneself", Level::N4),
  ("社", "しゃ", "company, shrine", Level::N4),
  ("発", "はつ", "departure, emit", Level::N4),
  ("者", "しゃ", "someone, person", Level::N4),
  ("地", "ち", "ground, earth", Level::N4),
  ("業", "ぎょう", "business, vocation", Level::N4),
  ("方", "ほう", "direction, way", Level::N4),
  ("新", "しん", "new", Level::N4),
  ("場", "じょう", "location, place", Level::N4),
  ("員", "いん", "member, employee", Level::N4),
  ("立", "りつ", "stand up", Level::N4),
  ("開", "かい", "open", Level::N4),
  // N3
  ("政", "せい", "politics, government", Level::N3),
  ("議", "ぎ", "deliberation", Level::N3),
  ("民", "みん", "people, nation", Level::N3),
  ("連", "れん", "take along, link", Level::N3),
  ("対", "たい", "opposite, versus", Level::N3),
  ("部", "ぶ", "section, department", Level::N3),
  ("合", "ごう", "fit, suit, join", Level::N3),
  ("市", "し", "city, market", Level::N3),
  ("内", "ない", "inside, within", Level::N3),
  ("相", "そう", "mutual, minister", Level::N3),
  ("定", "てい", "determine, fix", Level::N3),
  ("回", "かい", "times, revolve", Level::N3),
  ("選", "せん", "elect, select", Level::N3),
  ("米", "べい", "rice, America", Level::N3),
  ("実", "じつ", "reality, truth", Level::N3),
  // N2
  ("党", "とう", "party, faction", Level::N2),
  ("協", "きょう", "co-operation", Level::N2),
  ("総", "そう", "general, whole", Level::N2),
  ("区", "く", "ward, district", Level::N2),
  ("領", "りょう", "jurisdiction, dominion", Level::N2),
  ("県", "けん", "prefecture", Level::N2),
  ("設", "せつ", "establishment", Level::N2),
  ("改", "かい", "reformation, change", Level::N2),
  ("府", "ふ", "borough, urban prefecture", Level::N2),
  ("査", "さ", "investigate", Level::N2),
  ("委", "い", "committee, entrust", Level::N2),
  ("軍", "ぐん", "army, force", Level::N2),
  ("団", "だん", "group, association", Level::N2),
  ("各", "かく", "each, every", Level::N2),
  ("島", "とう", "island", Level::N2),
];
