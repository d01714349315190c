//! Section explanations

use ipcsense_core::{normalize, SectionCode};

/// Sections with a dedicated explanation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpcSection {
    PrivateDefense,
    Murder,
    CulpableHomicide,
    DeathByNegligence,
    AttemptCulpableHomicide,
    Hurt,
    GrievousHurt,
    VoluntarilyCausingHurt,
    AssaultOnWoman,
    Rape,
    Theft,
    Robbery,
    Cheating,
}

impl IpcSection {
    /// All known sections
    pub const ALL: [IpcSection; 13] = [
        Self::PrivateDefense,
        Self::Murder,
        Self::CulpableHomicide,
        Self::DeathByNegligence,
        Self::AttemptCulpableHomicide,
        Self::Hurt,
        Self::GrievousHurt,
        Self::VoluntarilyCausingHurt,
        Self::AssaultOnWoman,
        Self::Rape,
        Self::Theft,
        Self::Robbery,
        Self::Cheating,
    ];

    /// Look up a section by its code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.code() == code.trim())
    }

    /// Section code
    pub fn code(&self) -> &'static str {
        match self {
            Self::PrivateDefense => "100",
            Self::Murder => "302",
            Self::CulpableHomicide => "304",
            Self::DeathByNegligence => "304A",
            Self::AttemptCulpableHomicide => "308",
            Self::Hurt => "319",
            Self::GrievousHurt => "320",
            Self::VoluntarilyCausingHurt => "323",
            Self::AssaultOnWoman => "354",
            Self::Rape => "376",
            Self::Theft => "379",
            Self::Robbery => "392",
            Self::Cheating => "420",
        }
    }

    /// Fixed explanation text
    pub fn explanation(&self) -> &'static str {
        match self {
            Self::PrivateDefense => SELF_DEFENSE,
            Self::Murder => {
                "Murder:
- Punishment: Death or imprisonment for life, and fine
- For proving murder, the prosecution must establish intention to cause death
- The case must show premeditation or intention to cause bodily injury sufficient to cause death"
            }
            Self::CulpableHomicide => {
                "Culpable Homicide Not Amounting to Murder:
- Punishment: Imprisonment for life, or up to 10 years, and fine
- Applies when death is caused without the intention to cause death
- May apply when the act is done with the knowledge that it is likely to cause death"
            }
            Self::DeathByNegligence => {
                "Death by Negligence:
- Punishment: Imprisonment up to 2 years, or fine, or both
- Applies when death is caused by a rash or negligent act
- No intention to cause death or knowledge that the act would likely cause death"
            }
            Self::AttemptCulpableHomicide => {
                "Attempt to Commit Culpable Homicide:
- Punishment: Imprisonment up to 3 years, or fine, or both
- Applies when an act is done with the intention of causing culpable homicide
- The attempt does not result in death"
            }
            Self::Hurt => {
                "Hurt:
- Punishment: Imprisonment up to 1 year, or fine up to 1,000 rupees, or both
- Causing bodily pain, disease, or infirmity to any person
- Includes physical injury that causes pain"
            }
            Self::GrievousHurt => {
                "Grievous Hurt:
- Punishment: Imprisonment up to 7 years, and fine
- Includes emasculation, permanent privation of sight or hearing, fracture or dislocation of bones, or any hurt which endangers life"
            }
            Self::VoluntarilyCausingHurt => {
                "Voluntarily Causing Hurt:
- Punishment: Imprisonment up to 1 year, or fine up to 1,000 rupees, or both
- Intentionally causing bodily pain, disease, or infirmity
- Includes physical injury that is not severe enough to be grievous hurt"
            }
            Self::AssaultOnWoman => {
                "Assault on Woman:
- Punishment: Imprisonment of 1 to 5 years, and fine
- Assault or criminal force on a woman with intent to outrage her modesty
- The act must be intentional and with the knowledge that it would outrage modesty"
            }
            Self::Rape => {
                "Rape:
- Punishment: Rigorous imprisonment for a term not less than 7 years, may extend to life, and fine
- Sexual intercourse without consent or with consent obtained under fear, threat, or false promises"
            }
            Self::Theft => {
                "Theft:
- Punishment: Imprisonment up to 3 years, or fine, or both
- Involves dishonestly taking property without consent
- Must be done with the intention to permanently deprive the owner of the property"
            }
            Self::Robbery => {
                "Robbery:
- Punishment: Rigorous imprisonment up to 10 years, and fine
- Theft with the use of force or threat of force
- Includes cases where force is used immediately before or after the theft"
            }
            Self::Cheating => {
                "Cheating:
- Punishment: Imprisonment up to 7 years, and fine
- Involves dishonestly inducing a person to deliver property or consent to the keeping of property
- Must involve deception or fraudulent means"
            }
        }
    }
}

/// Explanation used whenever self-defense is in play
pub const SELF_DEFENSE: &str = "Self-Defense Analysis:

Under Indian law, the right to private defense is available under Sections 96-106 of the IPC.

When someone acts in self-defense resulting in death:
- Section 100 covers the right of private defense of the body extending to causing death
- This is applicable when there is reasonable apprehension of death or grievous hurt
- No recourse to public authorities was possible
- The force used was proportional to the threat

If the case involves Person B killing Person A in legitimate self-defense, Person B would not be considered guilty at all.

However, if excessive force beyond what was necessary for self-defense was used, Person B may be guilty of culpable homicide not amounting to murder under Section 304.";

/// Explanation for wage and employment disputes
pub const LABOR_LAW: &str = "Failure to pay minimum wage is primarily a violation under labor laws, specifically:

1. The Minimum Wages Act, 1948:
   - Section 22: Imprisonment up to 6 months or fine up to 500 rupees, or both
   - Employers are legally obligated to pay at least the minimum wage as notified

2. Under the Indian Penal Code, it may be considered:
   - Section 420 (Cheating): If the employer induced work with no intention to pay
   - May also be considered as criminal breach of trust in certain circumstances

The employee can:
1. File a complaint with the Labor Commissioner
2. File a civil suit for recovery of wages
3. In egregious cases, file a criminal complaint for cheating

The exact penalty depends on:
- Whether this was a systematic practice
- Number of employees affected
- Duration of non-payment
- Whether there was deceit involved";

/// Explanation for the reported section.
///
/// Context in the description takes precedence over the section: any mention
/// of self-defense yields the self-defense text, and wage or employer
/// disputes yield the labor-law text, whatever the section is.
pub fn explain(section: &SectionCode, description: &str) -> String {
    if section.as_str() == IpcSection::PrivateDefense.code() {
        return SELF_DEFENSE.to_string();
    }

    let text = normalize(description);
    if text.contains("self defense") {
        return SELF_DEFENSE.to_string();
    }
    if ["minimum wage", "labor", "employer"]
        .iter()
        .any(|needle| text.contains(needle))
    {
        return LABOR_LAW.to_string();
    }

    match IpcSection::from_code(section.as_str()) {
        Some(known) => known.explanation().to_string(),
        None => generic(section),
    }
}

fn generic(section: &SectionCode) -> String {
    format!(
        "Section {} of the Indian Penal Code:
- This section of the IPC applies to the described case
- Consult the IPC for detailed provisions regarding this offense
- Legal advice is recommended for specific interpretation of this section",
        section
    )
}
