use crate::questionnaire::{Item, ItemKind, QuestionnaireDefinition, ResponseDomain, Thresholds};

pub const ID: &str = "mdq";

/// MDQ: Mood Disorder Questionnaire.
/// Part 1: 13 yes/no symptom items (q1–q7 are the core mania symptoms).
/// Part 2: whether several symptoms occurred in the same period.
/// Part 3: functional impact, no/minor/moderate/serious.
pub fn definition() -> QuestionnaireDefinition {
    static ITEMS: std::sync::LazyLock<Vec<Item>> = std::sync::LazyLock::new(|| {
        let mut items = vec![
            symptom("q1", "Felt so good or hyper that others thought you were not your normal self", true),
            symptom("q2", "Felt unusually self-confident or that you had special talents", true),
            symptom("q3", "Needed much less sleep than usual and still felt rested", true),
            symptom("q4", "Were much more talkative or spoke faster than usual", true),
            symptom("q5", "Thoughts raced through your head or jumped between topics", true),
            symptom("q6", "Were so easily distracted that you had trouble concentrating", true),
            symptom("q7", "Had much more energy, were unusually active or did many more things", true),
            symptom("q8", "Were much more social or outgoing than usual", false),
            symptom("q9", "Were much more interested in sex than usual", false),
            symptom("q10", "Did things that were unusual, excessive, risky or showed poor judgement", false),
            symptom("q11", "Spent money in ways that got you or your family into trouble", false),
            symptom("q12", "Behaviour changes made work or study noticeably harder", false),
            symptom("q13", "Other people said you seemed like a different person", false),
        ];
        items.push(Item {
            id: "co_occurrence".to_string(),
            text: "Several of the above happened during the same period of time".to_string(),
            kind: ItemKind::CoOccurrence,
            domain: ResponseDomain::YesNo,
            core: false,
        });
        items.push(Item {
            id: "impact".to_string(),
            text: "How much of a problem any of these caused (work, family, money, legal trouble, arguments)".to_string(),
            kind: ItemKind::Impact,
            domain: ResponseDomain::ImpactScale,
            core: false,
        });
        items
    });

    QuestionnaireDefinition {
        id: ID.to_string(),
        name: "MDQ".to_string(),
        items: ITEMS.clone(),
        thresholds: Thresholds::default(),
    }
}

fn symptom(id: &str, text: &str, core: bool) -> Item {
    Item {
        id: id.to_string(),
        text: text.to_string(),
        kind: ItemKind::Symptom,
        domain: ResponseDomain::YesNo,
        core,
    }
}
