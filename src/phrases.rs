//! Built-in phrase pool: 20 canonical English phrases and their translations.
//!
//! This is the only shared data in the crate. It is static and read-only, so
//! it needs no synchronization. Languages without a translation for a phrase
//! fall back to the English text, and unknown language codes get the plain
//! English pool.

use serde::{Deserialize, Serialize};

use crate::domain::PhrasePair;

/// Languages the app offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  En, Es, Fr, De, It, Pt, Nl, Sv, No, Da,
  Fi, Pl, Cs, Sk, Hu, Ro, Bg, Hr, Sr, Sl,
  El, Tr, Ru, Uk, Ar, He, Fa, Hi, Bn, Ur,
  Ta, Th, Vi, Id, Ms, Tl, Sw, Ja, Ko, Zh,
}

impl Language {
  pub const ALL: [Language; 40] = [
    Language::En, Language::Es, Language::Fr, Language::De, Language::It,
    Language::Pt, Language::Nl, Language::Sv, Language::No, Language::Da,
    Language::Fi, Language::Pl, Language::Cs, Language::Sk, Language::Hu,
    Language::Ro, Language::Bg, Language::Hr, Language::Sr, Language::Sl,
    Language::El, Language::Tr, Language::Ru, Language::Uk, Language::Ar,
    Language::He, Language::Fa, Language::Hi, Language::Bn, Language::Ur,
    Language::Ta, Language::Th, Language::Vi, Language::Id, Language::Ms,
    Language::Tl, Language::Sw, Language::Ja, Language::Ko, Language::Zh,
  ];

  pub fn code(self) -> &'static str {
    match self {
      Language::En => "en", Language::Es => "es", Language::Fr => "fr", Language::De => "de",
      Language::It => "it", Language::Pt => "pt", Language::Nl => "nl", Language::Sv => "sv",
      Language::No => "no", Language::Da => "da", Language::Fi => "fi", Language::Pl => "pl",
      Language::Cs => "cs", Language::Sk => "sk", Language::Hu => "hu", Language::Ro => "ro",
      Language::Bg => "bg", Language::Hr => "hr", Language::Sr => "sr", Language::Sl => "sl",
      Language::El => "el", Language::Tr => "tr", Language::Ru => "ru", Language::Uk => "uk",
      Language::Ar => "ar", Language::He => "he", Language::Fa => "fa", Language::Hi => "hi",
      Language::Bn => "bn", Language::Ur => "ur", Language::Ta => "ta", Language::Th => "th",
      Language::Vi => "vi", Language::Id => "id", Language::Ms => "ms", Language::Tl => "tl",
      Language::Sw => "sw", Language::Ja => "ja", Language::Ko => "ko", Language::Zh => "zh",
    }
  }

  /// Case-insensitive lookup; `None` for codes we do not know.
  pub fn from_code(code: &str) -> Option<Language> {
    let code = code.trim();
    Language::ALL.iter().copied().find(|l| l.code().eq_ignore_ascii_case(code))
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseCategory {
  Greetings,
  Courtesy,
  Basics,
  Travel,
  Food,
}

pub struct CanonicalPhrase {
  pub key: &'static str,
  pub en: &'static str,
  pub category: PhraseCategory,
  translations: &'static [(Language, &'static str)],
}

impl CanonicalPhrase {
  /// Localized text, or the English text when no translation exists.
  pub fn text_for(&self, lang: Option<Language>) -> &'static str {
    lang
      .and_then(|l| self.translations.iter().find(|(tl, _)| *tl == l).map(|(_, t)| *t))
      .unwrap_or(self.en)
  }
}

use Language::{De, Es, Fr, It, Ja, Ko, Nl, Pt, Ru, Zh};
use PhraseCategory::{Basics, Courtesy, Food, Greetings, Travel};

pub static PHRASES: &[CanonicalPhrase] = &[
  CanonicalPhrase { key: "hello", en: "Hello", category: Greetings, translations: &[
    (Es, "Hola"), (Fr, "Salut"), (De, "Hallo"), (It, "Ciao"), (Pt, "Olá"),
    (Nl, "Hallo"), (Ru, "Привет"), (Ja, "こんにちは"), (Zh, "你好"), (Ko, "안녕하세요"),
  ]},
  CanonicalPhrase { key: "goodbye", en: "Goodbye", category: Greetings, translations: &[
    (Es, "Adiós"), (Fr, "Au revoir"), (De, "Auf Wiedersehen"), (It, "Arrivederci"), (Pt, "Adeus"),
    (Nl, "Tot ziens"), (Ru, "До свидания"), (Ja, "さようなら"), (Zh, "再见"), (Ko, "안녕히 가세요"),
  ]},
  CanonicalPhrase { key: "good_morning", en: "Good morning", category: Greetings, translations: &[
    (Es, "Buenos días"), (Fr, "Bonjour"), (De, "Guten Morgen"), (It, "Buongiorno"), (Pt, "Bom dia"),
    (Nl, "Goedemorgen"), (Ru, "Доброе утро"), (Ja, "おはようございます"), (Zh, "早上好"), (Ko, "좋은 아침이에요"),
  ]},
  CanonicalPhrase { key: "good_night", en: "Good night", category: Greetings, translations: &[
    (Es, "Buenas noches"), (Fr, "Bonne nuit"), (De, "Gute Nacht"), (It, "Buonanotte"), (Pt, "Boa noite"),
    (Nl, "Goedenacht"), (Ru, "Спокойной ночи"), (Ja, "おやすみなさい"), (Zh, "晚安"), (Ko, "안녕히 주무세요"),
  ]},
  CanonicalPhrase { key: "how_are_you", en: "How are you?", category: Greetings, translations: &[
    (Es, "¿Cómo estás?"), (Fr, "Comment ça va ?"), (De, "Wie geht es dir?"), (It, "Come stai?"), (Pt, "Como você está?"),
    (Nl, "Hoe gaat het?"), (Ru, "Как дела?"), (Ja, "お元気ですか？"), (Zh, "你好吗？"), (Ko, "어떻게 지내세요?"),
  ]},
  CanonicalPhrase { key: "nice_to_meet_you", en: "Nice to meet you", category: Greetings, translations: &[
    (Es, "Mucho gusto"), (Fr, "Enchanté"), (De, "Freut mich"), (It, "Piacere di conoscerti"), (Pt, "Prazer em conhecê-lo"),
    (Nl, "Aangenaam"), (Ru, "Приятно познакомиться"), (Ja, "はじめまして"), (Zh, "很高兴认识你"), (Ko, "만나서 반갑습니다"),
  ]},
  CanonicalPhrase { key: "see_you_later", en: "See you later", category: Greetings, translations: &[
    (Es, "Hasta luego"), (Fr, "À plus tard"), (De, "Bis später"), (It, "A dopo"), (Pt, "Até logo"),
    (Nl, "Tot later"), (Ru, "До встречи"), (Ja, "また後で"), (Zh, "待会儿见"), (Ko, "나중에 봐요"),
  ]},
  CanonicalPhrase { key: "thank_you", en: "Thank you", category: Courtesy, translations: &[
    (Es, "Gracias"), (Fr, "Merci"), (De, "Danke"), (It, "Grazie"), (Pt, "Obrigado"),
    (Nl, "Dank je"), (Ru, "Спасибо"), (Ja, "ありがとう"), (Zh, "谢谢"), (Ko, "감사합니다"),
  ]},
  CanonicalPhrase { key: "please", en: "Please", category: Courtesy, translations: &[
    (Es, "Por favor"), (Fr, "S'il vous plaît"), (De, "Bitte"), (It, "Per favore"), (Pt, "Por favor"),
    (Nl, "Alsjeblieft"), (Ru, "Пожалуйста"), (Ja, "お願いします"), (Zh, "请"), (Ko, "부탁합니다"),
  ]},
  CanonicalPhrase { key: "excuse_me", en: "Excuse me", category: Courtesy, translations: &[
    (Es, "Disculpe"), (Fr, "Excusez-moi"), (De, "Entschuldigung"), (It, "Mi scusi"), (Pt, "Com licença"),
    (Nl, "Pardon"), (Ru, "Извините"), (Ja, "すみません"), (Zh, "打扰一下"), (Ko, "실례합니다"),
  ]},
  CanonicalPhrase { key: "sorry", en: "I am sorry", category: Courtesy, translations: &[
    (Es, "Lo siento"), (Fr, "Je suis désolé"), (De, "Es tut mir leid"), (It, "Mi dispiace"), (Pt, "Desculpe"),
    (Nl, "Het spijt me"), (Ru, "Мне жаль"), (Ja, "ごめんなさい"), (Zh, "对不起"), (Ko, "죄송합니다"),
  ]},
  CanonicalPhrase { key: "yes", en: "Yes", category: Basics, translations: &[
    (Es, "Sí"), (Fr, "Oui"), (De, "Ja"), (It, "Sì"), (Pt, "Sim"),
    (Nl, "Ja"), (Ru, "Да"), (Ja, "はい"), (Zh, "是"), (Ko, "네"),
  ]},
  CanonicalPhrase { key: "no", en: "No", category: Basics, translations: &[
    (Es, "No"), (Fr, "Non"), (De, "Nein"), (It, "No"), (Pt, "Não"),
    (Nl, "Nee"), (Ru, "Нет"), (Ja, "いいえ"), (Zh, "不是"), (Ko, "아니요"),
  ]},
  CanonicalPhrase { key: "dont_understand", en: "I don't understand", category: Basics, translations: &[
    (Es, "No entiendo"), (Fr, "Je ne comprends pas"), (De, "Ich verstehe nicht"), (It, "Non capisco"), (Pt, "Eu não entendo"),
    (Nl, "Ik begrijp het niet"), (Ru, "Я не понимаю"), (Ja, "わかりません"), (Zh, "我不明白"), (Ko, "이해하지 못해요"),
  ]},
  CanonicalPhrase { key: "speak_english", en: "Do you speak English?", category: Basics, translations: &[
    (Es, "¿Hablas inglés?"), (Fr, "Parlez-vous anglais ?"), (De, "Sprichst du Englisch?"), (It, "Parli inglese?"), (Pt, "Você fala inglês?"),
    (Nl, "Spreek je Engels?"), (Ru, "Вы говорите по-английски?"), (Ja, "英語を話せますか？"), (Zh, "你会说英语吗？"), (Ko, "영어 할 줄 아세요?"),
  ]},
  CanonicalPhrase { key: "my_name_is", en: "My name is Anna", category: Basics, translations: &[
    (Es, "Me llamo Ana"), (Fr, "Je m'appelle Anna"), (De, "Ich heiße Anna"), (It, "Mi chiamo Anna"), (Pt, "Meu nome é Anna"),
    (Nl, "Ik heet Anna"), (Ru, "Меня зовут Анна"), (Ja, "私の名前はアンナです"), (Zh, "我叫安娜"), (Ko, "제 이름은 안나예요"),
  ]},
  CanonicalPhrase { key: "where_bathroom", en: "Where is the bathroom?", category: Travel, translations: &[
    (Es, "¿Dónde está el baño?"), (Fr, "Où sont les toilettes ?"), (De, "Wo ist die Toilette?"), (It, "Dov'è il bagno?"), (Pt, "Onde fica o banheiro?"),
    (Nl, "Waar is het toilet?"), (Ru, "Где туалет?"), (Ja, "トイレはどこですか？"), (Zh, "洗手间在哪里？"), (Ko, "화장실이 어디예요?"),
  ]},
  CanonicalPhrase { key: "how_much", en: "How much does it cost?", category: Travel, translations: &[
    (Es, "¿Cuánto cuesta?"), (Fr, "Combien ça coûte ?"), (De, "Wie viel kostet das?"), (It, "Quanto costa?"), (Pt, "Quanto custa?"),
    (Nl, "Hoeveel kost het?"), (Ru, "Сколько это стоит?"), (Ja, "いくらですか？"), (Zh, "多少钱？"), (Ko, "얼마예요?"),
  ]},
  CanonicalPhrase { key: "want_water", en: "I would like water", category: Food, translations: &[
    (Es, "Quisiera agua"), (Fr, "Je voudrais de l'eau"), (De, "Ich hätte gern Wasser"), (It, "Vorrei dell'acqua"), (Pt, "Eu gostaria de água"),
    (Nl, "Ik wil graag water"), (Ru, "Я хотел бы воды"), (Ja, "水をください"), (Zh, "我想要水"), (Ko, "물 주세요"),
  ]},
  CanonicalPhrase { key: "the_check", en: "The check, please", category: Food, translations: &[
    (Es, "La cuenta, por favor"), (Fr, "L'addition, s'il vous plaît"), (De, "Die Rechnung, bitte"), (It, "Il conto, per favore"), (Pt, "A conta, por favor"),
    (Nl, "De rekening, alstublieft"), (Ru, "Счёт, пожалуйста"), (Ja, "お会計をお願いします"), (Zh, "请结账"), (Ko, "계산서 주세요"),
  ]},
];

/// Localized phrase pairs for `code`, in pool order. Unknown codes get English.
pub fn phrase_pairs(code: &str) -> Vec<PhrasePair> {
  let lang = Language::from_code(code);
  PHRASES
    .iter()
    .map(|p| PhrasePair { key: p.key, en: p.en, target: p.text_for(lang) })
    .collect()
}

/// Distinct localized strings, in pool order.
pub fn localized_pool(code: &str) -> Vec<&'static str> {
  let mut out: Vec<&'static str> = Vec::with_capacity(PHRASES.len());
  for pair in phrase_pairs(code) {
    if !out.contains(&pair.target) {
      out.push(pair.target);
    }
  }
  out
}

/// Phrases of one category, localized.
pub fn phrases_in_category(code: &str, category: PhraseCategory) -> Vec<PhrasePair> {
  let lang = Language::from_code(code);
  PHRASES
    .iter()
    .filter(|p| p.category == category)
    .map(|p| PhrasePair { key: p.key, en: p.en, target: p.text_for(lang) })
    .collect()
}
