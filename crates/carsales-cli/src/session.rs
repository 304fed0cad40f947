//! A single analyzer session: the current sales table plus the requests that read it.
//!
//! The session is the only owner of the base table. `generate` and `load` replace it; every view
//! borrows it and hands it to a transform. A request that fails leaves the table as it was.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use carsales_model::{
    category_totals, display, entity_totals, filter_above_threshold, generate_with_rng,
    parse_count, parse_threshold, rank, AnalyzerConfig, DisplayTable, SalesTable,
};
use rand::rngs::StdRng;
use rand::SeedableRng as _;
use serde_json::Value as JsonValue;

use crate::render::{write_error, write_view, OutputFormat};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Sales,
    EntityTotals,
    CategoryTotals,
    Rankings,
    Filtered,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::Sales => "Sales Data",
            View::EntityTotals => "Salesperson Totals",
            View::CategoryTotals => "Category Totals",
            View::Rankings => "Rankings",
            View::Filtered => "Top Performers",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            View::Sales => "sales",
            View::EntityTotals => "salesperson_totals",
            View::CategoryTotals => "category_totals",
            View::Rankings => "rankings",
            View::Filtered => "filtered",
        }
    }
}

/// One line of input in interactive mode.
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    Generate(Option<String>),
    Load(String),
    Show,
    Totals,
    Categories,
    Rank,
    Filter(Option<String>),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  generate [count]     generate a new sales table (replaces the current one)
  load <json>          load a table from a JSON grid, e.g. [[\"Ana\", 1, 2, 3]]
  show                 show the current sales table
  totals               units sold per salesperson
  categories           units sold per category
  rank                 salespeople ranked by units sold
  filter [threshold]   salespeople selling more than the threshold
  help                 show this message
  quit                 leave the session";

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_request(line: &str) -> Result<Option<Request>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    let request = match word.to_ascii_lowercase().as_str() {
        "generate" | "gen" => Request::Generate(arg),
        "load" => match arg {
            Some(json) => Request::Load(json),
            None => bail!("load needs a JSON grid argument"),
        },
        "show" => Request::Show,
        "totals" => Request::Totals,
        "categories" => Request::Categories,
        "rank" => Request::Rank,
        "filter" => Request::Filter(arg),
        "help" | "?" => Request::Help,
        "quit" | "exit" => Request::Quit,
        other => bail!("unknown command '{other}' (try `help`)"),
    };
    Ok(Some(request))
}

pub struct Session {
    config: AnalyzerConfig,
    rng: StdRng,
    table: Option<SalesTable>,
}

impl Session {
    /// A `seed` makes every `generate` in this session reproducible.
    pub fn new(config: AnalyzerConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            rng,
            table: None,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn table(&self) -> Option<&SalesTable> {
        self.table.as_ref()
    }

    pub fn generate(&mut self, count: usize) -> Result<&SalesTable> {
        let table = generate_with_rng(
            count,
            &self.config.categories,
            self.config.max_count,
            &mut self.rng,
        )?;
        log::info!("new session table: {} salespeople", table.len());
        Ok(&*self.table.insert(table))
    }

    pub fn load_grid(&mut self, grid: &[Vec<JsonValue>]) -> Result<&SalesTable> {
        let table = SalesTable::from_grid(grid, self.config.categories.len())?;
        log::info!("loaded session table: {} salespeople", table.len());
        Ok(&*self.table.insert(table))
    }

    fn current(&self) -> Result<&SalesTable> {
        match &self.table {
            Some(table) => Ok(table),
            None => bail!("no sales data yet; run `generate` first"),
        }
    }

    pub fn sales_view(&self) -> Result<DisplayTable> {
        Ok(display::base_table(
            self.current()?,
            &self.config.categories,
        )?)
    }

    pub fn totals_view(&self) -> Result<DisplayTable> {
        Ok(display::entity_totals(&entity_totals(self.current()?)))
    }

    pub fn categories_view(&self) -> Result<DisplayTable> {
        let totals = category_totals(self.current()?, &self.config.categories)?;
        Ok(display::category_totals(&totals))
    }

    pub fn rankings_view(&self) -> Result<DisplayTable> {
        Ok(display::ranking(&rank(self.current()?)))
    }

    pub fn filter_view(&self, threshold: f64) -> Result<DisplayTable> {
        let outcome = filter_above_threshold(self.current()?, threshold)?;
        Ok(display::filtered(&outcome))
    }

    /// Run one request. `Help` and `Quit` are handled by the caller and produce no view.
    pub fn execute(&mut self, request: Request) -> Result<Option<(View, DisplayTable)>> {
        let result = match request {
            Request::Generate(count) => {
                let count = match count {
                    Some(input) => parse_count(&input)?,
                    None => self.config.default_count,
                };
                self.generate(count)?;
                (View::Sales, self.sales_view()?)
            }
            Request::Load(json) => {
                let grid: Vec<Vec<JsonValue>> =
                    serde_json::from_str(&json).context("parse JSON grid")?;
                self.load_grid(&grid)?;
                (View::Sales, self.sales_view()?)
            }
            Request::Show => (View::Sales, self.sales_view()?),
            Request::Totals => (View::EntityTotals, self.totals_view()?),
            Request::Categories => (View::CategoryTotals, self.categories_view()?),
            Request::Rank => (View::Rankings, self.rankings_view()?),
            Request::Filter(threshold) => {
                let threshold = match threshold {
                    Some(input) => parse_threshold(&input)?,
                    None => self.config.default_threshold,
                };
                (View::Filtered, self.filter_view(threshold)?)
            }
            Request::Help | Request::Quit => return Ok(None),
        };
        Ok(Some(result))
    }
}

/// Read requests line by line until `quit` or end of input.
///
/// Failed requests are reported on `output` and the loop keeps going.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: &mut W,
    format: OutputFormat,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let request = match parse_request(&line) {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(err) => {
                write_error(output, format, &format!("{err:#}"))?;
                continue;
            }
        };

        match request {
            Request::Quit => break,
            Request::Help => writeln!(output, "{HELP}")?,
            request => match session.execute(request) {
                Ok(Some((view, table))) => write_view(output, format, view, &table)?,
                Ok(None) => {}
                Err(err) => {
                    log::debug!("request failed: {err:#}");
                    write_error(output, format, &format!("{err:#}"))?;
                }
            },
        }
        output.flush()?;
    }
    Ok(())
}
