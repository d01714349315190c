//! First Information Report drafting

use ipcsense_core::{AnalysisOutcome, AnalysisResult, SectionCode};
use serde::{Deserialize, Serialize};

/// Complainant form for an FIR draft
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FirRequest {
    pub complainant_name: String,
    pub complainant_address: String,
    pub complainant_phone: String,
    pub incident_date: String,
    pub incident_time: String,
    pub incident_location: String,
    pub incident_description: String,
    pub suspect_details: String,
    pub witnesses: String,
    pub crime_type: String,
    pub formatted_incident_date: String,
    pub formatted_current_date: String,
}

/// Analysis summary returned with a draft
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirAnalysis {
    pub predicted_section: SectionCode,
    pub explanation: String,
    pub recommendations: String,
}

/// Successful draft response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirDraft {
    pub success: bool,
    pub fir_draft: String,
    pub analysis: FirAnalysis,
}

impl FirRequest {
    /// Analyzer input assembled from the form fields
    pub fn analysis_input(&self) -> String {
        format!(
            "
Crime Type: {}
Incident Description: {}
Location: {}
Date and Time: {} {}
Suspect Details: {}
Witness Information: {}
",
            self.crime_type,
            self.incident_description,
            self.incident_location,
            self.incident_date,
            self.incident_time,
            self.suspect_details,
            self.witnesses
        )
    }

    /// Draft from an analysis outcome; a failed analysis yields its error
    pub fn draft(&self, outcome: &AnalysisOutcome) -> Result<FirDraft, String> {
        match outcome {
            AnalysisOutcome::Analyzed(result) => Ok(FirDraft {
                success: true,
                fir_draft: self.render(result),
                analysis: FirAnalysis {
                    predicted_section: result.predicted_section.clone(),
                    explanation: result.explanation.clone(),
                    recommendations: result.recommendations.clone(),
                },
            }),
            AnalysisOutcome::Failed(failure) => Err(failure.error.clone()),
        }
    }

    /// Render the FIR letter
    pub fn render(&self, analysis: &AnalysisResult) -> String {
        let place = self
            .incident_location
            .split(',')
            .next()
            .unwrap_or_default();

        format!(
            "FIRST INFORMATION REPORT
(Under Section 154 Cr.P.C)

Date: {incident_date}
Time: {time}

To,
The Station House Officer
[Police Station Name]
[City]

Subject: FIR regarding {crime} incident - IPC Section {section}

Sir/Madam,

I, {name}, residing at {address}, would like to report the following incident:

On {incident_date} at approximately {time}, at {location}, the following incident occurred:

{description}

Based on the incident details, this case appears to fall under IPC Section {section}.
{explanation}

Details of suspect(s):
{suspects}

Witness Information:
{witnesses}

I can be contacted at: {phone}

Legal Analysis and Recommendations:
{recommendations}

I hereby declare that all the information provided above is true to the best of my knowledge.

Yours faithfully,
{name}
Date: {current_date}
Place: {place}

Note: This is a computer-generated draft FIR. Please verify all details before submission.",
            incident_date = self.formatted_incident_date,
            time = self.incident_time,
            crime = self.crime_type.to_lowercase(),
            section = analysis.predicted_section,
            name = self.complainant_name,
            address = self.complainant_address,
            location = self.incident_location,
            description = self.incident_description,
            explanation = analysis.explanation,
            suspects = self.suspect_details,
            witnesses = self.witnesses,
            phone = self.complainant_phone,
            recommendations = analysis.recommendations,
            current_date = self.formatted_current_date,
            place = place,
        )
    }
}
