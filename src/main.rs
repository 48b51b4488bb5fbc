//! Terminal driver for the company discovery workflow.
//!
//! Renders the current phase to stdout and reads one command per line from
//! stdin. Logs go to stderr.

use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;

use tokio::io::{self, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing_subscriber::{fmt, prelude::*};

use company_discovery::adapters::{GatewayConfig, HttpDiscoveryGateway};
use company_discovery::application::{CompletedCall, InFlight, PhaseController};
use company_discovery::config::{AppConfig, LoggingConfig};
use company_discovery::domain::company::ValidationResult;
use company_discovery::domain::roi::{FieldDescriptor, InputKind, RenderedRoi};
use company_discovery::domain::workflow::{
    PhaseContent, PhaseView, ProjectCard, RetryAffordance, RoiPanel, WorkflowError,
    WorkflowEvent,
};

type StdinLines = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging);

    let gateway = HttpDiscoveryGateway::new(GatewayConfig::from(&config.gateway))?;
    tracing::info!("Using analysis service at {}", gateway.base_url());

    let mut controller = PhaseController::new(Arc::new(gateway));
    let mut lines = BufReader::new(io::stdin()).lines();
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();

    let mut view = controller.view();
    render(&view);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let line = line.trim();
                if matches!(line, "q" | "quit") {
                    break;
                }

                let event = match parse_command(&view, line) {
                    Some(Command::Event(event)) => Some(event),
                    Some(Command::Roi(index)) => read_roi_form(&view, index, &mut lines).await?,
                    None => {
                        println!("Unrecognized command: {}", line);
                        None
                    }
                };
                if let Some(event) = event {
                    follow_up(controller.handle(event), &done_tx);
                }
            }
            Some(done) = done_rx.recv() => {
                follow_up(controller.complete(done), &done_tx);
            }
        }

        view = controller.view();
        render(&view);
    }

    Ok(())
}

/// Runs the next call in the background and reports local rejections.
/// Gateway failures are already part of the view.
fn follow_up(
    result: Result<Option<InFlight>, WorkflowError>,
    done_tx: &UnboundedSender<CompletedCall>,
) {
    match result {
        Ok(Some(call)) => {
            let done_tx = done_tx.clone();
            tokio::spawn(async move {
                // The receiver only closes on exit.
                let _ = done_tx.send(call.await);
            });
        }
        Ok(None) => {}
        Err(err) if !err.is_boundary() => println!("! {}", err.user_message()),
        Err(_) => {}
    }
}

fn render(view: &PhaseView) {
    print_view(view);
    print_commands(view);
}

fn init_tracing(logging: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(logging.env_filter());
    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

enum Command {
    Event(WorkflowEvent),
    Roi(usize),
}

fn parse_command(view: &PhaseView, line: &str) -> Option<Command> {
    match line {
        "back" | "b" => return Some(Command::Event(WorkflowEvent::BackRequested)),
        "new" | "n" => return Some(Command::Event(WorkflowEvent::NewAnalysisRequested)),
        _ => {}
    }

    let event = match &view.content {
        PhaseContent::CompanyInput { .. } => WorkflowEvent::CompanySubmitted(line.to_string()),
        PhaseContent::Validating { validation, .. } => match line {
            "proceed" | "p" => WorkflowEvent::ProceedRequested,
            _ => {
                let suggestions = validation.as_ref()?.offered_suggestions();
                let choice = pick(line, suggestions.len())?;
                WorkflowEvent::SuggestionChosen(suggestions[choice].clone())
            }
        },
        PhaseContent::Researching { hypotheses, .. } => match line {
            "validate" | "v" => WorkflowEvent::HypothesesValidated,
            _ => {
                let choice = pick(line, hypotheses.len())?;
                WorkflowEvent::HypothesisToggled(hypotheses[choice].hypothesis.text.clone())
            }
        },
        PhaseContent::Results { .. } => {
            let index = line.strip_prefix("roi ")?.trim().parse().ok()?;
            return Some(Command::Roi(index));
        }
    };
    Some(Command::Event(event))
}

/// 1-based menu choice to a 0-based index.
fn pick(line: &str, len: usize) -> Option<usize> {
    let choice: usize = line.parse().ok()?;
    (1..=len).contains(&choice).then(|| choice - 1)
}

async fn read_roi_form(
    view: &PhaseView,
    index: usize,
    lines: &mut StdinLines,
) -> io::Result<Option<WorkflowEvent>> {
    let Some(card) = find_card(view, index) else {
        println!("No project {}", index);
        return Ok(None);
    };

    println!("{} for {}", card.form.submit_label, card.project.title);
    let mut values = HashMap::new();
    for field in card.form.fields() {
        println!("  {}", field_prompt(field));
        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };
        let value = match (line.trim(), field.initial_value) {
            ("", Some(initial)) => initial.to_string(),
            (typed, _) => typed.to_string(),
        };
        values.insert(field.name.clone(), value);
    }

    Ok(Some(WorkflowEvent::RoiSubmitted {
        project_index: card.index,
        project_title: card.project.title.clone(),
        values,
    }))
}

fn find_card(view: &PhaseView, index: usize) -> Option<&ProjectCard> {
    match &view.content {
        PhaseContent::Results {
            aligned, filler, ..
        } => aligned.iter().chain(filler.iter()).find(|c| c.index == index),
        _ => None,
    }
}

fn field_prompt(field: &FieldDescriptor) -> String {
    let mut prompt = field.label.clone();
    if let (Some(prefix), Some(suffix)) = (field.prefix, field.suffix) {
        prompt.push_str(&format!(" [{}..{}]", prefix, suffix));
    }
    if let InputKind::Select(options) = &field.input {
        let options: Vec<String> = options.iter().map(|o| format!("{}x", o)).collect();
        prompt.push_str(&format!(" one of {}", options.join(", ")));
    }
    match (field.initial_value, &field.placeholder) {
        (Some(initial), _) => prompt.push_str(&format!(" (default {})", initial)),
        (None, Some(placeholder)) => prompt.push_str(&format!(" (e.g. {})", placeholder)),
        (None, None) => {}
    }
    if let Some(tooltip) = &field.tooltip {
        prompt.push_str(&format!(" - {}", tooltip));
    }
    prompt
}

// ════════════════════════════════════════════════════════════════════════════
// Rendering
// ════════════════════════════════════════════════════════════════════════════

fn print_view(view: &PhaseView) {
    println!();
    println!("== {} ==", view.phase);

    if let Some(loading) = view.loading {
        println!("{}", loading);
    }
    if let Some(error) = &view.error {
        println!("Error: {}", error.message);
        if error.retry == RetryAffordance::Reload {
            println!("(type 'new' to start over)");
        }
        return;
    }

    match &view.content {
        PhaseContent::CompanyInput { prefill } => {
            if let Some(name) = prefill {
                println!("Last submitted: {}", name);
            }
        }
        PhaseContent::Validating {
            submitted,
            validation,
            ..
        } => {
            println!("Company: {}", submitted);
            if let Some(validation) = validation {
                print_validation(validation);
            }
        }
        PhaseContent::Researching {
            profile,
            findings,
            hypotheses,
            ..
        } => {
            if let Some(profile) = profile {
                println!("{} - {} ({})", profile.name(), profile.industry(), profile.size());
                if let Some(description) = profile.description() {
                    println!("{}", description);
                }
            }
            if !findings.is_empty() {
                println!("Research findings:");
                for finding in findings {
                    println!("  - {}", finding);
                }
            }
            if !hypotheses.is_empty() {
                println!("Strategic hypotheses:");
            }
            for (n, row) in hypotheses.iter().enumerate() {
                let mark = if row.checked { "x" } else { " " };
                println!("  {}. [{}] {}", n + 1, mark, row.hypothesis.text);
                println!("       Rationale: {}", row.hypothesis.rationale);
                println!("       AI opportunity: {}", row.hypothesis.ai_opportunity);
            }
        }
        PhaseContent::Results {
            header,
            aligned,
            filler,
            filler_toggle_label,
        } => {
            if let Some(header) = header {
                println!("{} | {}", header.company_name, header.industry);
                if let Some(description) = &header.description {
                    println!("{}", description);
                }
                println!("Selected hypotheses:");
                for text in &header.selected_hypotheses {
                    println!("  - {}", text);
                }
            }
            for card in aligned {
                print_card(card);
            }
            if let Some(label) = filler_toggle_label {
                println!("-- {} --", label);
            }
            for card in filler {
                print_card(card);
            }
        }
    }
}

fn print_validation(validation: &ValidationResult) {
    println!("[{:?}] {}", validation.banner(), validation.message);
    if let (Some(level), Some(score)) = (validation.confidence_level(), validation.confidence) {
        println!("Confidence: {:?} ({}%)", level, score);
    }
    if let Some(sources) = validation.sources_line() {
        println!("{}", sources);
    }
    for (n, suggestion) in validation.offered_suggestions().iter().enumerate() {
        println!("  {}. {}", n + 1, suggestion);
    }
}

fn print_card(card: &ProjectCard) {
    let project = &card.project;
    println!();
    println!("[{}] {}", card.index, project.title);
    if !project.priority.is_empty() {
        println!("    Priority: {}", project.priority);
    }
    if !project.description.is_empty() {
        println!("    {}", project.description);
    }
    println!(
        "    Timeline: {} | Investment: {}",
        project.timeline, project.investment_range
    );
    if let Some(alignment) = &project.hypothesis_alignment {
        println!("    Addresses: {}", alignment);
    }
    if let Some(expected) = &project.expected_roi {
        println!("    Expected ROI: {}", expected);
    }
    print_panel(&card.roi);
}

fn print_panel(panel: &RoiPanel) {
    if panel.pending {
        println!("    Calculating...");
    }
    if let Some(error) = &panel.error {
        println!("    {}", error.message);
    }
    if let Some(rendered) = &panel.rendered {
        print_rendered(rendered);
    }
}

fn print_rendered(rendered: &RenderedRoi) {
    println!("    {} ({:?})", rendered.heading, rendered.band);
    for metric in &rendered.metrics {
        println!("      {}: {}", metric.label, metric.value);
    }
    for row in &rendered.comparison {
        println!("      {}: {}{}{}", row.label, row.left, row.separator, row.right);
    }
    for (name, value) in &rendered.variables {
        println!("      {}: {}", name, value);
    }
    println!("    {}", rendered.summary);
}

fn print_commands(view: &PhaseView) {
    let commands = match &view.content {
        PhaseContent::CompanyInput { .. } => "company name | quit",
        PhaseContent::Validating { .. } => "proceed | <n> pick suggestion | back | new | quit",
        PhaseContent::Researching { .. } => "<n> toggle hypothesis | validate | back | new | quit",
        PhaseContent::Results { .. } => "roi <project> | back | new | quit",
    };
    println!("> {}", commands);
}
