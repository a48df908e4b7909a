// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-category prompt templates for synthetic query generation.
//!
//! Each template asks the model for human-like search-bar or chatbot queries
//! as a strict JSON array of `{"example", "category"}` objects, with a
//! category-specific focus and exclusion list so neighboring categories do
//! not bleed into each other.

/// Category-specific guidance: what the queries should be about and what
/// belongs to a neighboring category instead.
struct CategoryGuidance<'a> {
    focus: &'a str,
    avoid: &'static str,
    samples: &'static [&'static str],
}

fn guidance_for(category: &str) -> CategoryGuidance<'_> {
    match category {
        "Coding" => CategoryGuidance {
            focus: "coding, programming tasks, writing code, or implementing algorithms, \
                    with some queries containing code snippets typed naturally",
            avoid: "errors, debugging, or troubleshooting",
            samples: &[
                "reverse list python",
                "how to implement reverse function in python",
                "javascript function to flatten nested arrays",
                "for i in range(10) print(i)",
            ],
        },
        "Debugging" => CategoryGuidance {
            focus: "identifying, analyzing, or fixing a problem in existing code, with \
                    realistic error messages, wrong-output descriptions, or performance issues",
            avoid: "writing new code from scratch, factual programming questions, or code conversion",
            samples: &[
                "I'm getting 'IndexError: list index out of range'. How do I fix this in my python loop?",
                "my SQL query keeps returning empty results even though I know the data is there, what did I miss?",
                "my website loads so slow sometimes. what's the first thing i shud check for performance problems?",
            ],
        },
        "Creative_Writing" => CategoryGuidance {
            focus: "original imaginative text: stories, poems, dialogue, plot ideas, or \
                    stylistic writing with a specific tone or theme",
            avoid: "summarization, factual questions, analysis of existing texts, or code",
            samples: &[
                "Can you draft a poem about the color blue but make it sound sad",
                "help me write the opening lines of a fantasy novel where the hero is scared",
                "suggest me some unique plot twists for a murder mystery in space",
            ],
        },
        "Factual_QA" => CategoryGuidance {
            focus: "specific, verifiable, objective facts with short answers: people, places, \
                    definitions, dates, or numerical values",
            avoid: "opinions, hypotheticals, data analysis, coding, medical, or legal topics",
            samples: &[
                "who was the first president of the usa",
                "speed of light in a vacum",
                "what year did the cold war end",
            ],
        },
        "Summarization" => CategoryGuidance {
            focus: "condensing provided or referenced text: articles, emails, meeting notes, \
                    papers, or long documents into shorter form",
            avoid: "creating original content, answering factual questions, or analyzing data",
            samples: &[
                "summarize this article in 3 bullet points",
                "tldr of the attached meeting notes",
                "can you shorten this email to two sentences",
            ],
        },
        "Translation" => CategoryGuidance {
            focus: "translating words, phrases, or passages between natural languages, \
                    sometimes naming the source and target language explicitly",
            avoid: "converting code between programming languages or summarizing text",
            samples: &[
                "translate good morning to japanese",
                "how do you say where is the train station in german",
                "english to spanish: the meeting is postponed until friday",
            ],
        },
        "Data_Analysis" => CategoryGuidance {
            focus: "analyzing datasets, statistics, aggregations, chart requests, or \
                    interpreting metrics and trends, including macro-level market data",
            avoid: "debugging requests, pure coding questions unrelated to analyzing data, \
                    or medical and legal topics",
            samples: &[
                "calculate correlation pandas two cols",
                "sql group by month sum revenue",
                "summarize sales.csv find trends",
            ],
        },
        "Planning_Itinerary" => CategoryGuidance {
            focus: "structured planning or scheduling: travel itineraries, study plans, \
                    work schedules, meeting agendas, with dates and locations typed naturally",
            avoid: "casual chit-chat, coding, debugging, medical, or legal topics",
            samples: &[
                "5 day norway hiking trip",
                "study schedule next week for finals",
                "plan team meeting agenda 3 hours",
            ],
        },
        "Sensitive_Medical_Legal" => CategoryGuidance {
            focus: "medical symptoms, lab results, medications, treatments, legal issues, \
                    patient rights, or healthcare regulations, with specific numbers or \
                    terminology typed naturally",
            avoid: "coding, debugging, or general knowledge questions",
            samples: &[
                "high ALP level causes",
                "ibuprofen dosage for 35kg child",
                "can my doctor share my medical records legally",
            ],
        },
        "ChitChat" => CategoryGuidance {
            focus: "casual small talk, greetings, jokes, or open-ended conversational \
                    messages with no task behind them",
            avoid: "any concrete task: questions with factual answers, planning, writing, or code",
            samples: &["hey whats up", "tell me a joke", "how was your day"],
        },
        other => CategoryGuidance {
            focus: other,
            avoid: "queries belonging to any other category",
            samples: &[],
        },
    }
}

/// System message sent with every generation request.
pub fn system_prompt() -> &'static str {
    "You are an expert synthetic data generator for human-like queries."
}

/// Build the generation prompt for one batch.
pub fn build_prompt(category: &str, batch_size: usize) -> String {
    let guidance = guidance_for(category);
    let samples = guidance
        .samples
        .iter()
        .map(|s| format!("    {{\"example\": \"{s}\", \"category\": \"{category}\"}}"))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "You are a data generation assistant. Your task is to generate {batch_size} \
         human-like user queries for the category \"{category}\".\n\n\
         These queries should look exactly like a real user typed them into a search bar \
         or chatbot:\n\
         - A mix of short keyword-style fragments and normal question-style queries\n\
         - Typos or missing punctuation are okay\n\
         - Only the essential words a user would type, casual phrasing\n\n\
         Focus on {focus}.\n\
         Do NOT include queries about {avoid}.\n\n\
         Provide the output as a strict JSON array of objects with this format:\n\
         [\n    {{\"example\": \"user query here\", \"category\": \"{category}\"}}\n]\n\n\
         Important guidelines:\n\
         1. Each example must be completely unique.\n\
         2. Mix short fragments and full question-style queries.\n\
         3. Ensure the category field is exactly \"{category}\".\n\n\
         Here are sample examples for style guidance (do NOT repeat them):\n[\n{samples}\n]",
        focus = guidance.focus,
        avoid = guidance.avoid,
    )
}
