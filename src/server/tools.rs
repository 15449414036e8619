//! MCP Server tools for Vedic chart calculations

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime, Utc};
use rmcp::{
    RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
    },
    schemars::{self, schema_for},
    service::RequestContext,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chart_cache::get_birth_chart;
use crate::error::{ChartError, ToolError};
use crate::models::{
    AscendantSummary, HouseSummary, PlanetAspectSummary, PlanetShadbala, PlanetSummary, Varga,
    VedicChart,
};
use crate::vedic::{jsonld, sunrise_sunset, BirthDetails};

/// Birth details shared by every tool
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct BirthDetailsInput {
    #[schemars(description = "Birth year (e.g. 1996)")]
    pub birth_year: i32,
    #[schemars(description = "Birth month, 1-12")]
    pub birth_month: u32,
    #[schemars(description = "Birth day of month, 1-31")]
    pub birth_day: u32,
    #[schemars(description = "Birth hour in local time, 0-23")]
    pub birth_hour: u32,
    #[schemars(description = "Birth minute, 0-59")]
    pub birth_minute: u32,
    #[schemars(description = "Birth second, 0-59")]
    pub birth_second: u32,
    #[schemars(description = "Latitude of birth place in degrees (north positive)")]
    pub latitude: f64,
    #[schemars(description = "Longitude of birth place in degrees (east positive)")]
    pub longitude: f64,
    #[schemars(description = "Offset of local time from UTC in hours (e.g. 5.5 for IST)")]
    pub timezone_offset: f64,
    #[serde(default)]
    #[schemars(description = "Name of the person (optional, used as the chart label)")]
    pub name: String,
    #[serde(default)]
    #[schemars(description = "Birth place name (optional, informational only)")]
    pub location_name: String,
}

impl BirthDetailsInput {
    pub fn details(&self) -> BirthDetails {
        BirthDetails {
            year: self.birth_year,
            month: self.birth_month,
            day: self.birth_day,
            hour: self.birth_hour,
            minute: self.birth_minute,
            second: self.birth_second,
            latitude: self.latitude,
            longitude: self.longitude,
            timezone_offset: self.timezone_offset,
        }
    }
}

/// Input for a divisional chart
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct DivisionalChartInput {
    #[serde(flatten)]
    pub birth: BirthDetailsInput,
    #[schemars(description = "Divisional chart code: d2, d3, d4, d7, d9, d10, d12, d16, d24, d27, d30 or d60")]
    pub chart_code: String,
}

fn schema_to_value<T: schemars::JsonSchema>() -> Arc<serde_json::Map<String, Value>> {
    let schema = schema_for!(T);
    match serde_json::to_value(schema) {
        Ok(Value::Object(map)) => Arc::new(map),
        _ => Arc::new(serde_json::Map::new()),
    }
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ToolError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Current wall-clock time at the birth place's fixed offset
fn now_at_offset(timezone_offset: f64) -> NaiveDateTime {
    Utc::now().naive_utc() + Duration::seconds((timezone_offset * 3600.0).round() as i64)
}

/// MCP Server for Vedic astrology
#[derive(Clone, Default)]
pub struct JyotishServer;

impl JyotishServer {
    pub fn new() -> Self {
        Self
    }

    fn chart(&self, input: &BirthDetailsInput) -> Result<Arc<VedicChart>, ChartError> {
        let birth_date = input.details().local_datetime()?;
        get_birth_chart(
            birth_date,
            input.latitude,
            input.longitude,
            input.timezone_offset,
            non_empty(&input.location_name),
            non_empty(&input.name),
        )
    }

    pub fn calculate_birth_chart(&self, input: BirthDetailsInput) -> Result<String, ToolError> {
        let chart = self.chart(&input)?;
        Ok(jsonld::to_json_ld_string(&chart)?)
    }

    pub fn get_panchanga(&self, input: BirthDetailsInput) -> Result<String, ToolError> {
        to_json(&self.chart(&input)?.panchanga)
    }

    pub fn get_planetary_positions(&self, input: BirthDetailsInput) -> Result<String, ToolError> {
        let chart = self.chart(&input)?;
        let planets: Vec<PlanetSummary> =
            chart.d1_chart.planets.iter().map(PlanetSummary::from).collect();
        to_json(&planets)
    }

    pub fn get_dashas(&self, input: BirthDetailsInput) -> Result<String, ToolError> {
        let chart = self.chart(&input)?;
        let summary = chart
            .dashas
            .summary_at(now_at_offset(input.timezone_offset));
        to_json(&summary)
    }

    pub fn get_divisional_chart(&self, input: DivisionalChartInput) -> Result<String, ToolError> {
        let varga = match Varga::from_code(&input.chart_code) {
            Some(varga) => varga,
            None => {
                return Ok(format!(
                    "Unknown chart code: '{}'. Valid codes: {}",
                    input.chart_code,
                    Varga::valid_codes()
                ))
            }
        };

        let chart = self.chart(&input.birth)?;
        match chart.divisional_charts.get(varga.code()) {
            Some(divisional) => to_json(divisional),
            None => Ok(format!("Chart {} not found.", varga.code())),
        }
    }

    pub fn get_ashtakavarga(&self, input: BirthDetailsInput) -> Result<String, ToolError> {
        to_json(&self.chart(&input)?.ashtakavarga)
    }

    pub fn get_shadbala(&self, input: BirthDetailsInput) -> Result<String, ToolError> {
        let chart = self.chart(&input)?;
        let strengths: Vec<PlanetShadbala> =
            chart.d1_chart.planets.iter().map(PlanetShadbala::from).collect();
        to_json(&strengths)
    }

    pub fn get_ascendant(&self, input: BirthDetailsInput) -> Result<String, ToolError> {
        let chart = self.chart(&input)?;
        match chart.d1_chart.houses.first() {
            Some(first) => to_json(&AscendantSummary::from(first)),
            None => Err(ChartError::Ephemeris("chart has no houses".to_string()).into()),
        }
    }

    pub fn get_houses_summary(&self, input: BirthDetailsInput) -> Result<String, ToolError> {
        let chart = self.chart(&input)?;
        let houses: Vec<HouseSummary> = chart.d1_chart.houses.iter().map(HouseSummary::from).collect();
        to_json(&houses)
    }

    pub fn get_planetary_aspects(&self, input: BirthDetailsInput) -> Result<String, ToolError> {
        let chart = self.chart(&input)?;
        let aspects: Vec<PlanetAspectSummary> = chart
            .d1_chart
            .planets
            .iter()
            .map(PlanetAspectSummary::from)
            .collect();
        to_json(&aspects)
    }

    pub fn get_ayanamsa(&self, input: BirthDetailsInput) -> Result<String, ToolError> {
        to_json(&self.chart(&input)?.ayanamsa)
    }

    pub fn get_sunrise_sunset(&self, input: BirthDetailsInput) -> Result<String, ToolError> {
        // Surface chart errors first, as every other tool does
        self.chart(&input)?;
        to_json(&sunrise_sunset(&input.details())?)
    }

    fn get_tools(&self) -> Vec<Tool> {
        vec![
            Tool::new(
                "calculate_birth_chart",
                "Compute a full Vedic birth chart (D1, divisional charts, panchanga, dashas, ashtakavarga, shadbala) and return it as JSON-LD.",
                schema_to_value::<BirthDetailsInput>(),
            ),
            Tool::new(
                "get_panchanga",
                "Return the panchanga (tithi, nakshatra, yoga, karana, vaara) for the birth moment.",
                schema_to_value::<BirthDetailsInput>(),
            ),
            Tool::new(
                "get_planetary_positions",
                "Return D1 planetary positions: body, sign, degrees, nakshatra, pada, house, motion and dignity.",
                schema_to_value::<BirthDetailsInput>(),
            ),
            Tool::new(
                "get_dashas",
                "Return Vimshottari dasha periods: balance at birth, current and upcoming mahadashas.",
                schema_to_value::<BirthDetailsInput>(),
            ),
            Tool::new(
                "get_divisional_chart",
                "Return a divisional chart (d9 Navamsa, d10 Dasamsa, etc.). chart_code: d2-d60.",
                schema_to_value::<DivisionalChartInput>(),
            ),
            Tool::new(
                "get_ashtakavarga",
                "Return the Sarvashtakavarga and the Bhinnashtakavarga of each planet.",
                schema_to_value::<BirthDetailsInput>(),
            ),
            Tool::new(
                "get_shadbala",
                "Return the shadbala (six-fold strength) of each planet in the D1 chart.",
                schema_to_value::<BirthDetailsInput>(),
            ),
            Tool::new(
                "get_ascendant",
                "Return the ascendant (Lagna) sign, degrees, nakshatra and pada.",
                schema_to_value::<BirthDetailsInput>(),
            ),
            Tool::new(
                "get_houses_summary",
                "Return the twelve D1 houses with sign, lord and occupants.",
                schema_to_value::<BirthDetailsInput>(),
            ),
            Tool::new(
                "get_planetary_aspects",
                "Return the aspects (graha drishti) given and received by each planet in the D1 chart.",
                schema_to_value::<BirthDetailsInput>(),
            ),
            Tool::new(
                "get_ayanamsa",
                "Return the ayanamsa name and value (degrees) used for the chart.",
                schema_to_value::<BirthDetailsInput>(),
            ),
            Tool::new(
                "get_sunrise_sunset",
                "Return sunrise and sunset (hours after local midnight) on the birth date and whether the birth was during the day.",
                schema_to_value::<BirthDetailsInput>(),
            ),
        ]
    }
}

fn parse<T: serde::de::DeserializeOwned>(args: Value) -> Result<T, rmcp::ErrorData> {
    serde_json::from_value(args).map_err(|e| rmcp::ErrorData::invalid_params(e.to_string(), None))
}

impl ServerHandler for JyotishServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Jyotish - MCP Server for Vedic astrology. Every tool takes the birth date and \
                 time (local), latitude, longitude and timezone offset; start with \
                 calculate_birth_chart or ask for a single part such as get_dashas."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::ErrorData> {
        Ok(ListToolsResult {
            tools: self.get_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        let args: Value = Value::Object(request.arguments.unwrap_or_default());
        self.dispatch(request.name.as_ref(), args)
    }
}

impl JyotishServer {
    /// Run a tool by name; tool failures become error results, unknown tools
    /// and undecodable arguments are protocol errors
    pub fn dispatch(&self, name: &str, args: Value) -> Result<CallToolResult, rmcp::ErrorData> {
        let result = match name {
            "calculate_birth_chart" => self.calculate_birth_chart(parse(args)?),
            "get_panchanga" => self.get_panchanga(parse(args)?),
            "get_planetary_positions" => self.get_planetary_positions(parse(args)?),
            "get_dashas" => self.get_dashas(parse(args)?),
            "get_divisional_chart" => self.get_divisional_chart(parse(args)?),
            "get_ashtakavarga" => self.get_ashtakavarga(parse(args)?),
            "get_shadbala" => self.get_shadbala(parse(args)?),
            "get_ascendant" => self.get_ascendant(parse(args)?),
            "get_houses_summary" => self.get_houses_summary(parse(args)?),
            "get_planetary_aspects" => self.get_planetary_aspects(parse(args)?),
            "get_ayanamsa" => self.get_ayanamsa(parse(args)?),
            "get_sunrise_sunset" => self.get_sunrise_sunset(parse(args)?),
            _ => {
                return Err(rmcp::ErrorData::invalid_params(
                    format!("Unknown tool: {}", name),
                    None,
                ))
            }
        };

        match result {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => {
                tracing::warn!("Tool {} failed: {}", name, e);
                Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart_cache::clear_cache;
    use serde_json::json;
    use serial_test::serial;

    fn birth_args() -> Value {
        json!({
            "birth_year": 1996,
            "birth_month": 7,
            "birth_day": 4,
            "birth_hour": 9,
            "birth_minute": 10,
            "birth_second": 0,
            "latitude": 18.404,
            "longitude": 75.195,
            "timezone_offset": 5.5
        })
    }

    fn birth() -> BirthDetailsInput {
        parse(birth_args()).unwrap()
    }

    fn json_of(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn name_and_location_default_to_empty() {
        let input = birth();
        assert_eq!(input.name, "");
        assert_eq!(input.location_name, "");
    }

    #[test]
    fn missing_fields_are_invalid_params() {
        let err = parse::<BirthDetailsInput>(json!({ "birth_year": 1996 })).unwrap_err();
        assert!(err.message.contains("missing field"));
    }

    #[test]
    fn twelve_tools_are_listed() {
        let tools = JyotishServer::new().get_tools();
        assert_eq!(tools.len(), 12);
        let divisional = tools
            .iter()
            .find(|t| t.name == "get_divisional_chart")
            .unwrap();
        let properties = divisional.input_schema.get("properties").unwrap();
        assert!(properties.get("chart_code").is_some());
        assert!(properties.get("birth_year").is_some());
    }

    #[test]
    #[serial]
    fn birth_chart_is_json_ld_with_name() {
        clear_cache();
        let mut input = birth();
        input.name = "Bhampu".to_string();
        let doc = json_of(&JyotishServer::new().calculate_birth_chart(input).unwrap());
        assert_eq!(doc["@type"], "VedicBirthChart");
        assert!(doc.get("@context").is_some());
        assert_eq!(doc["person"]["name"], "Bhampu");
    }

    #[test]
    #[serial]
    fn panchanga_for_known_birth() {
        clear_cache();
        let doc = json_of(&JyotishServer::new().get_panchanga(birth()).unwrap());
        assert_eq!(doc["nakshatra"], "Dhanishta");
        assert_eq!(doc["tithi"], "Krishna Chaturthi");
        for key in ["yoga", "karana", "vaara"] {
            assert!(doc[key].is_string(), "missing {}", key);
        }
    }

    #[test]
    #[serial]
    fn nine_planetary_positions() {
        clear_cache();
        let doc = json_of(&JyotishServer::new().get_planetary_positions(birth()).unwrap());
        let planets = doc.as_array().unwrap();
        assert_eq!(planets.len(), 9);
        for p in planets {
            for key in ["celestial_body", "sign", "sign_degrees", "nakshatra", "house", "motion_type", "dignity"] {
                assert!(p.get(key).is_some(), "missing {}", key);
            }
        }
        assert!(planets.iter().any(|p| p["celestial_body"] == "Moon"));
    }

    #[test]
    #[serial]
    fn dashas_have_current_and_upcoming() {
        let doc = json_of(&JyotishServer::new().get_dashas(birth()).unwrap());
        assert!(doc["current"]["mahadashas"].is_array());
        assert!(doc["upcoming"]["mahadashas"].is_array());
        assert!(doc["balance"]["lord"].is_string());
    }

    #[test]
    #[serial]
    fn navamsa_has_twelve_houses() {
        let input = DivisionalChartInput {
            birth: birth(),
            chart_code: " D9 ".to_string(),
        };
        let doc = json_of(&JyotishServer::new().get_divisional_chart(input).unwrap());
        assert_eq!(doc["houses"].as_array().unwrap().len(), 12);
        assert!(doc["ascendant"]["signDegrees"].is_number());
    }

    #[test]
    fn unknown_divisional_code_is_reported() {
        let input = DivisionalChartInput {
            birth: birth(),
            chart_code: "d99".to_string(),
        };
        let text = JyotishServer::new().get_divisional_chart(input).unwrap();
        assert_eq!(
            text,
            "Unknown chart code: 'd99'. Valid codes: d2, d3, d4, d7, d9, d10, d12, d16, d24, d27, d30, d60"
        );
    }

    #[test]
    fn unknown_code_is_checked_before_the_date() {
        let mut birth = birth();
        birth.birth_month = 13;
        let input = DivisionalChartInput {
            birth,
            chart_code: "d1".to_string(),
        };
        let text = JyotishServer::new().get_divisional_chart(input).unwrap();
        assert!(text.starts_with("Unknown chart code: 'd1'"));
    }

    #[test]
    #[serial]
    fn ascendant_and_houses() {
        let server = JyotishServer::new();
        let asc = json_of(&server.get_ascendant(birth()).unwrap());
        assert_eq!(asc["house_number"], 1);
        assert!(asc["sign_degrees"].is_number());

        let houses = json_of(&server.get_houses_summary(birth()).unwrap());
        let houses = houses.as_array().unwrap();
        assert_eq!(houses.len(), 12);
        assert_eq!(houses[0]["sign"], asc["sign"]);
    }

    #[test]
    #[serial]
    fn shadbala_skips_nodes() {
        let doc = json_of(&JyotishServer::new().get_shadbala(birth()).unwrap());
        let entries = doc.as_array().unwrap();
        assert_eq!(entries.len(), 9);
        let rahu = entries.iter().find(|e| e["celestial_body"] == "Rahu").unwrap();
        assert!(rahu["shadbala"].is_null());
        let sun = entries.iter().find(|e| e["celestial_body"] == "Sun").unwrap();
        assert!(sun["shadbala"]["total_rupas"].is_number());
    }

    #[test]
    #[serial]
    fn ashtakavarga_and_aspects() {
        let server = JyotishServer::new();
        let av = json_of(&server.get_ashtakavarga(birth()).unwrap());
        assert_eq!(av["sarvashtakavarga"]["total"], 337);

        let aspects = json_of(&server.get_planetary_aspects(birth()).unwrap());
        let jupiter = aspects
            .as_array()
            .unwrap()
            .iter()
            .find(|a| a["celestial_body"] == "Jupiter")
            .unwrap();
        assert_eq!(jupiter["aspects_given"].as_array().unwrap().len(), 3);
    }

    #[test]
    #[serial]
    fn ayanamsa_and_sunrise() {
        let server = JyotishServer::new();
        let ayanamsa = json_of(&server.get_ayanamsa(birth()).unwrap());
        assert!(ayanamsa["name"].is_string());
        let value = ayanamsa["value"].as_f64().unwrap();
        assert!(value > 23.5 && value < 24.2);

        let sun = json_of(&server.get_sunrise_sunset(birth()).unwrap());
        assert_eq!(sun["day_birth"], true);
        assert!(sun["sunrise_hours_from_midnight"].as_f64().unwrap() < 7.0);
    }

    #[test]
    #[serial]
    fn invalid_date_is_a_tool_error() {
        let mut input = birth();
        input.birth_day = 31;
        input.birth_month = 2;
        let err = JyotishServer::new().get_panchanga(input).unwrap_err();
        assert!(matches!(err, ToolError::Chart(ChartError::InvalidDateTime(_))));
        assert!(err.to_string().contains("1996-02-31"));
    }

    fn text_of(result: &CallToolResult) -> String {
        result.content[0].as_text().unwrap().text.clone()
    }

    #[test]
    fn unknown_tool_is_invalid_params() {
        let err = JyotishServer::new()
            .dispatch("get_transits", birth_args())
            .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("get_transits"));
    }

    #[test]
    fn undecodable_arguments_are_invalid_params() {
        let mut args = birth_args();
        args["birth_year"] = json!("nineteen ninety-six");
        let err = JyotishServer::new()
            .dispatch("get_panchanga", args)
            .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);

        let err = JyotishServer::new()
            .dispatch("get_divisional_chart", birth_args())
            .unwrap_err();
        assert!(err.message.contains("chart_code"));
    }

    #[test]
    fn chart_errors_become_error_results() {
        let mut args = birth_args();
        args["latitude"] = json!(95.0);
        let result = JyotishServer::new()
            .dispatch("get_ascendant", args)
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            ChartError::InvalidCoordinates { latitude: 95.0, longitude: 75.195 }.to_string()
        );
    }

    #[test]
    #[serial]
    fn successful_tools_return_text() {
        let result = JyotishServer::new()
            .dispatch("get_ayanamsa", birth_args())
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        assert!(json_of(&text_of(&result))["value"].is_number());
    }
}
