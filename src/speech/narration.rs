//! Narration scripts for classification results
//!
//! Fixed bilingual explanations of why an item was classified the way it
//! was, templated with the classifier's confidence. The wording walks
//! through the reasons for the classification, names examples, and ends
//! with disposal guidance.

use std::fmt;

/// Language tag used for English narration
pub const ENGLISH_TAG: &str = "en-US";

/// Language tag used for Telugu narration
pub const TELUGU_TAG: &str = "te-IN";

/// Classification label returned by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WasteClass {
    Organic,
    Recyclable,
    /// A label outside the known set
    Other(String),
}

impl WasteClass {
    /// Map a server label onto the known classes
    pub fn parse(label: &str) -> Self {
        match label {
            "Organic" => WasteClass::Organic,
            "Recyclable" => WasteClass::Recyclable,
            other => WasteClass::Other(other.to_string()),
        }
    }
}

impl fmt::Display for WasteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WasteClass::Organic => write!(f, "Organic"),
            WasteClass::Recyclable => write!(f, "Recyclable"),
            WasteClass::Other(label) => write!(f, "{}", label),
        }
    }
}

/// Format a confidence percentage the way it should be spoken:
/// whole percentages without a decimal point, otherwise one decimal place
pub fn format_confidence(confidence: f64) -> String {
    if (confidence - confidence.round()).abs() < 0.05 {
        format!("{}", confidence.round() as i64)
    } else {
        format!("{:.1}", confidence)
    }
}

/// Build the English narration for a classification result
///
/// Unknown classes get a generic message naming the label, rather than
/// silence, so the user always hears what the server decided.
pub fn english_script(class: &WasteClass, confidence: f64) -> String {
    let confidence = format_confidence(confidence);

    match class {
        WasteClass::Organic => format!(
            "This is organic waste with {confidence} percent confidence. \
             This is classified as organic for the following reasons. \
             First, it originates from living organisms like plants or animals. \
             Second, it contains biodegradable materials that microorganisms can break down naturally. \
             Third, it has organic compounds with carbon, nitrogen, and other nutrients. \
             Fourth, bacteria and fungi can decompose it through natural biological processes. \
             Fifth, it can transform into nutrient-rich compost that enriches soil. \
             Examples include food scraps, fruit peels, vegetable waste, and coffee grounds. \
             Please place it in the green or brown composting bin. \
             Organic waste creates valuable compost, reduces methane emissions from landfills, \
             and returns nutrients to the soil, making it highly beneficial for the environment."
        ),
        WasteClass::Recyclable => format!(
            "This is recyclable waste with {confidence} percent confidence. \
             This is classified as recyclable for the following reasons. \
             First, the material can be reprocessed through physical or chemical methods. \
             Second, it does not biodegrade but can be melted, reformed, or repulped into new products. \
             Third, materials like plastic, glass, metal, and paper retain their properties after recycling. \
             Fourth, recycling this waste conserves raw materials and reduces the need for virgin resources. \
             Fifth, the recycling process uses less energy than creating new products from scratch. \
             Examples include plastic containers, glass bottles, aluminum cans, and paper packaging. \
             Please clean the item and place it in the blue recycling bin. \
             Recycling conserves natural resources, reduces energy consumption, decreases pollution, \
             and helps protect the environment for future generations."
        ),
        WasteClass::Other(label) => format!(
            "This item was classified as {label} with {confidence} percent confidence. \
             No disposal guidance is available for this category. \
             Please check your local waste handling instructions."
        ),
    }
}

/// Build the Telugu narration for a classification result
pub fn telugu_script(class: &WasteClass, confidence: f64) -> String {
    let confidence = format_confidence(confidence);

    match class {
        WasteClass::Organic => format!(
            "ఇది సేంద్రియ వ్యర్థం. నమ్మకం స్థాయి {confidence} శాతం. \
             ఇది సేంద్రియ వ్యర్థం ఎందుకు అనే కారణాలు ఇవి. \
             మొదటిది, ఇది మొక్కలు లేదా జంతువుల వంటి జీవ పదార్థాల నుండి వస్తుంది. \
             రెండవది, ఇందులో సూక్ష్మజీవులు సహజంగా విచ్ఛిన్నం చేయగల జీవ వికలనీయ పదార్థాలు ఉన్నాయి. \
             మూడవది, ఇందులో కార్బన్, నత్రజని మరియు ఇతర పోషకాలతో కూడిన సేంద్రియ సమ్మేళనాలు ఉన్నాయి. \
             నాల్గవది, బ్యాక్టీరియా మరియు శిలీంధ్రాలు సహజ జీవ ప్రక్రియల ద్వారా దీనిని కుళ్ళిపోయేలా చేస్తాయి. \
             ఐదవది, ఇది మట్టిని సమృద్ధి చేసే పోషకాలతో కూడిన కంపోస్ట్ గా మారుతుంది. \
             ఉదాహరణలు ఆహార స్క్రాప్స్, పండ్ల తొక్కలు, కూరగాయల వ్యర్థం, కాఫీ గ్రౌండ్స్. \
             దయచేసి దీన్ని ఆకుపచ్చ లేదా గోధుమ రంగు కంపోస్టింగ్ డబ్బాలో వేయండి. \
             సేంద్రియ వ్యర్థం విలువైన కంపోస్ట్ ను సృష్టిస్తుంది, ల్యాండ్ ఫిల్స్ నుండి మీథేన్ \
             ఉద్గారాలను తగ్గిస్తుంది, మరియు మట్టికి పోషకాలను తిరిగి ఇస్తుంది. \
             ఇది పర్యావరణానికి చాలా మంచిది."
        ),
        WasteClass::Recyclable => format!(
            "ఇది రీసైకిల్ చేయదగిన వ్యర్థం. నమ్మకం స్థాయి {confidence} శాతం. \
             ఇది రీసైకిల్ చేయదగినది అనే కారణాలు ఇవి. \
             మొదటిది, ఈ పదార్థాన్ని భౌతిక లేదా రసాయన పద్ధతుల ద్వారా తిరిగి ప్రాసెస్ చేయవచ్చు. \
             రెండవది, ఇది జీవ వికలనం కాదు కానీ కరిగించి, పునర్నిర్మాణం చేసి, లేదా కొత్త ఉత్పత్తులుగా మార్చవచ్చు. \
             మూడవది, ప్లాస్టిక్, గాజు, లోహం, కాగితం వంటి పదార్థాలు రీసైకిలింగ్ తర్వాత వాటి లక్షణాలను నిలుపుకుంటాయి. \
             నాల్గవది, ఈ వ్యర్థాన్ని రీసైకిల్ చేయడం ముడి పదార్థాలను సంరక్షిస్తుంది మరియు కొత్త వనరుల అవసరాన్ని తగ్గిస్తుంది. \
             ఐదవది, రీసైకిలింగ్ ప్రక్రియ మొదటి నుండి కొత్త ఉత్పత్తులను సృష్టించడం కంటే తక్కువ శక్తిని ఉపయోగిస్తుంది. \
             ఉదాహరణలు ప్లాస్టిక్ కంటైనర్లు, గాజు సీసాలు, అల్యూమినియం డబ్బాలు, కాగితం ప్యాకేజింగ్. \
             దయచేసి వస్తువును శుభ్రం చేసి నీలం రంగు రీసైకిలింగ్ డబ్బాలో వేయండి. \
             రీసైకిలింగ్ సహజ వనరులను సంరక్షిస్తుంది, శక్తి వినియోగాన్ని తగ్గిస్తుంది, కాలుష్యాన్ని \
             తగ్గిస్తుంది, మరియు భవిష్యత్ తరాలకు పర్యావరణాన్ని రక్షించడంలో సహాయపడుతుంది."
        ),
        WasteClass::Other(label) => format!(
            "ఈ వస్తువు {label} గా వర్గీకరించబడింది. నమ్మకం స్థాయి {confidence} శాతం. \
             ఈ వర్గానికి పారవేత సూచనలు అందుబాటులో లేవు. \
             దయచేసి మీ స్థానిక వ్యర్థ నిర్వహణ సూచనలను చూడండి."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_labels() {
        assert_eq!(WasteClass::parse("Organic"), WasteClass::Organic);
        assert_eq!(WasteClass::parse("Recyclable"), WasteClass::Recyclable);
        assert_eq!(
            WasteClass::parse("Hazardous"),
            WasteClass::Other("Hazardous".to_string())
        );
    }

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(92.0), "92");
        assert_eq!(format_confidence(92.04), "92");
        assert_eq!(format_confidence(92.5), "92.5");
        assert_eq!(format_confidence(87.25), "87.2");
    }

    #[test]
    fn test_english_organic_script() {
        let script = english_script(&WasteClass::Organic, 92.0);
        assert!(script.contains("92 percent"));
        assert!(script.contains("organic waste"));
        assert!(script.contains("composting bin"));
    }

    #[test]
    fn test_english_recyclable_script() {
        let script = english_script(&WasteClass::Recyclable, 95.5);
        assert!(script.contains("95.5 percent"));
        assert!(script.contains("recyclable waste"));
        assert!(script.contains("recycling bin"));
    }

    #[test]
    fn test_telugu_scripts_are_distinct() {
        let organic = telugu_script(&WasteClass::Organic, 92.0);
        let recyclable = telugu_script(&WasteClass::Recyclable, 92.0);
        assert!(organic.contains("శాతం"));
        assert!(recyclable.contains("శాతం"));
        assert_ne!(organic, recyclable);
    }

    #[test]
    fn test_unknown_class_gets_fallback() {
        let english = english_script(&WasteClass::Other("Hazardous".to_string()), 80.0);
        assert!(english.contains("Hazardous"));
        assert!(english.contains("80 percent"));

        let telugu = telugu_script(&WasteClass::Other("Hazardous".to_string()), 80.0);
        assert!(telugu.contains("Hazardous"));
        assert!(!telugu.is_empty());
    }
}
