use tracing::debug;

use crate::{parse_payload, SLeader, SMatrixPayload, SMatrixRow, SOpponentResult};
use crate::bar_chart::format_number;
use crate::error::{EWidgetError, WidgetResult};
use crate::ports::{TElement, TJsonFetcher, TPage};

pub const CONTAINER_SELECTOR: &str = ".winrates-container";
pub const READY_CLASS: &str = "winrates-container-ready";
pub const DATA_URL_ATTRIBUTE: &str = "data-url";

const TABLE_CLASS: &str = "table-responsive";
const PORTRAIT_WIDTH: &str = "120";
const PORTRAIT_HEIGHT: &str = "40";

const WIN_THRESHOLD: f64 = 60.0;
const EVEN_THRESHOLD: f64 = 45.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EOutcomeBand {
    Win,
    Even,
    Loss,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EMatchupCell {
    Mirror,
    NoData,
    Played {
        band: EOutcomeBand,
        winrate: f64,
        matches: u32,
    },
}

impl EOutcomeBand {
    pub fn from_winrate(winrate: f64) -> Self {
        if winrate >= WIN_THRESHOLD {
            Self::Win
        }
        else if winrate >= EVEN_THRESHOLD {
            Self::Even
        }
        else {
            Self::Loss
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Even => "even",
            Self::Loss => "loss",
        }
    }
}

impl EMatchupCell {
    pub fn classify(leader_name: &str, opponent: &SOpponentResult) -> Self {
        if opponent.name == leader_name {
            return Self::Mirror;
        }

        match (opponent.winrate, opponent.matches) {
            (Some(_), Some(0)) => Self::NoData,
            (Some(winrate), Some(matches)) => Self::Played {
                band: EOutcomeBand::from_winrate(winrate),
                winrate,
                matches,
            },
            _ => Self::NoData,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Mirror => "mirror",
            Self::NoData => "na",
            Self::Played { band, .. } => band.css_class(),
        }
    }
}

pub fn matches_label(matches: u32) -> &'static str {
    if matches == 1 { "match" } else { "matches" }
}

pub fn format_matches(matches: u32) -> String {
    format!("{} {}", matches, matches_label(matches))
}

pub fn format_winrate(winrate: f64) -> String {
    format!("{}%", format_number(winrate))
}

fn append_new<P: TPage>(page: &P, parent: &P::Element, tag: &str) -> WidgetResult<P::Element> {
    let elem = page.create_element(tag)?;
    parent.append_child(&elem)?;
    Ok(elem)
}

fn append_portrait<P: TPage>(page: &P, cell: &P::Element, leader: &SLeader) -> WidgetResult<()> {
    let img = append_new(page, cell, "img")?;
    img.set_attribute("src", leader.art.as_str())?;
    img.set_attribute("width", PORTRAIT_WIDTH)?;
    img.set_attribute("height", PORTRAIT_HEIGHT)?;
    img.set_attribute("alt", leader.name.as_str())?;
    Ok(())
}

fn append_matchup_cell<P: TPage>(page: &P, tr: &P::Element, leader_name: &str, opponent: &SOpponentResult) -> WidgetResult<()> {
    let td = append_new(page, tr, "td")?;
    let entry = append_new(page, &td, "div")?;
    entry.add_class("entry")?;

    let cell = EMatchupCell::classify(leader_name, opponent);
    entry.add_class(cell.css_class())?;

    match cell {
        EMatchupCell::Mirror => entry.set_text("Mirror"),
        EMatchupCell::NoData => entry.set_text("N/A"),
        EMatchupCell::Played { winrate, matches, .. } => {
            let winrate_div = append_new(page, &entry, "div")?;
            winrate_div.add_class("winrate")?;
            winrate_div.set_text(format_winrate(winrate).as_str());

            let matches_div = append_new(page, &entry, "div")?;
            matches_div.add_class("matches")?;
            matches_div.set_text(format_matches(matches).as_str());
        },
    }

    Ok(())
}

/// Builds the detached leader-by-leader table.
pub fn build_winrates_table<P: TPage>(page: &P, rows: &[SMatrixRow]) -> WidgetResult<P::Element> {
    let table = page.create_element("table")?;
    table.add_class(TABLE_CLASS)?;

    // -- header: blank corner, then one portrait per leader
    let thead = append_new(page, &table, "thead")?;
    let thead_tr = append_new(page, &thead, "tr")?;
    append_new(page, &thead_tr, "th")?;
    for row in rows {
        let th = append_new(page, &thead_tr, "th")?;
        append_portrait(page, &th, &row.leader)?;
    }

    let tbody = append_new(page, &table, "tbody")?;
    for row in rows {
        let tr = append_new(page, &tbody, "tr")?;

        let td_first = append_new(page, &tr, "td")?;
        append_portrait(page, &td_first, &row.leader)?;

        for opponent in &row.opponents {
            append_matchup_cell(page, &tr, row.leader.name.as_str(), opponent)?;
        }
    }

    Ok(table)
}

/// Replaces the container's content with the matrix table and marks it ready.
pub fn render_winrates_matrix<P: TPage>(page: &P, container: &P::Element, payload: &SMatrixPayload) -> WidgetResult<()> {
    let table = build_winrates_table(page, &payload.data)?;

    container.clear_children();
    container.append_child(&table)?;
    container.add_class(READY_CLASS)?;

    Ok(())
}

pub async fn load_winrates_matrix<P, F>(page: &P, fetcher: &F, container: &P::Element) -> WidgetResult<()>
where
    P: TPage,
    F: TJsonFetcher + ?Sized,
{
    let data_url = container.attribute(DATA_URL_ATTRIBUTE)
        .ok_or_else(|| EWidgetError::MissingAttribute(String::from(DATA_URL_ATTRIBUTE)))?;

    let body = fetcher.get_text(data_url.as_str()).await?;
    let payload : SMatrixPayload = parse_payload(&body)?;

    render_winrates_matrix(page, container, &payload)?;

    debug!(data_url = data_url.as_str(), leaders = payload.data.len(), "winrates matrix rendered");
    Ok(())
}

/// Loads one matrix. Any failure leaves the container exactly as it was and is not reported.
pub async fn init_winrates_matrix<P, F>(page: &P, fetcher: &F, container: &P::Element)
where
    P: TPage,
    F: TJsonFetcher + ?Sized,
{
    if let Err(e) = load_winrates_matrix(page, fetcher, container).await {
        debug!(error = %e, "winrates matrix not rendered");
    }
}

pub fn discover_winrates_containers<P: TPage>(page: &P) -> WidgetResult<Vec<P::Element>> {
    page.query_selector_all(CONTAINER_SELECTOR)
}
