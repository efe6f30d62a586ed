//! HTML rendering for the symptom form.

use std::fmt::Write;

use crate::predictor::DiseasePrediction;

/// What to show below the form.
#[derive(Debug)]
pub enum Outcome<'a> {
    /// A voted prediction.
    Prediction(&'a DiseasePrediction),
    /// All three models disagreed and the tie policy refused to pick.
    Inconclusive {
        random_forest: &'a str,
        naive_bayes: &'a str,
        svm: &'a str,
    },
    /// Something went wrong while predicting.
    Failure(&'a str),
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the full page: the form, the echoed selection and the outcome.
pub fn render_index(symptoms: &[String], selected: &[String], outcome: Option<Outcome<'_>>) -> String {
    let mut page = String::with_capacity(8 * 1024 + symptoms.len() * 64);
    page.push_str(HEAD);

    page.push_str("<form method=\"post\" action=\"/\">\n");
    page.push_str(
        "<label for=\"symptom_search\">Search symptoms</label>\n\
         <input type=\"text\" id=\"symptom_search\" autocomplete=\"off\">\n\
         <select id=\"symptom_dropdown\" size=\"10\">\n",
    );
    for symptom in symptoms {
        let symptom = escape_html(symptom);
        let _ = writeln!(page, "<option value=\"{symptom}\">{symptom}</option>");
    }
    page.push_str("</select>\n<ul id=\"selected_symptoms_list\">\n");
    for symptom in selected {
        let _ = writeln!(page, "<li>{}</li>", escape_html(symptom));
    }
    let _ = writeln!(
        page,
        "</ul>\n<input type=\"hidden\" id=\"selected_symptoms\" name=\"selected_symptoms\" value=\"{}\">",
        escape_html(&selected.join(","))
    );
    page.push_str("<button type=\"submit\">Predict</button>\n</form>\n");

    if let Some(outcome) = outcome {
        render_outcome(&mut page, selected, outcome);
    }

    page.push_str(TAIL);
    page
}

fn render_outcome(page: &mut String, selected: &[String], outcome: Outcome<'_>) {
    page.push_str("<section id=\"result\">\n");
    if !selected.is_empty() {
        let echoed: Vec<String> = selected.iter().map(|s| escape_html(s)).collect();
        let _ = writeln!(page, "<p>Selected symptoms: {}</p>", echoed.join(", "));
    }

    match outcome {
        Outcome::Prediction(prediction) => {
            let _ = writeln!(
                page,
                "<h2>Predicted disease: {}</h2>\n<p class=\"agreement\">{} of 3 models agree</p>",
                escape_html(&prediction.final_prediction),
                prediction.agreement()
            );
            render_model_table(
                page,
                &prediction.random_forest,
                &prediction.naive_bayes,
                &prediction.svm,
            );
        }
        Outcome::Inconclusive {
            random_forest,
            naive_bayes,
            svm,
        } => {
            page.push_str("<h2 class=\"inconclusive\">Inconclusive: the models disagree</h2>\n");
            render_model_table(page, random_forest, naive_bayes, svm);
        }
        Outcome::Failure(message) => {
            let _ = writeln!(
                page,
                "<h2 class=\"error\">Prediction failed</h2>\n<p class=\"error\">{}</p>",
                escape_html(message)
            );
        }
    }
    page.push_str("</section>\n");
}

fn render_model_table(page: &mut String, random_forest: &str, naive_bayes: &str, svm: &str) {
    page.push_str("<table>\n<tr><th>Model</th><th>Prediction</th></tr>\n");
    for (model, prediction) in [
        ("Random forest", random_forest),
        ("Naive Bayes", naive_bayes),
        ("SVM", svm),
    ] {
        let _ = writeln!(
            page,
            "<tr><td>{model}</td><td>{}</td></tr>",
            escape_html(prediction)
        );
    }
    page.push_str("</table>\n");
}

const HEAD: &str = "<!DOCTYPE html>\n\
<html lang=\"en\">\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<title>Disease prediction</title>\n\
</head>\n\
<body>\n\
<h1>Disease prediction from symptoms</h1>\n";

const TAIL: &str = "<script src=\"/static/app.js\"></script>\n</body>\n</html>\n";
