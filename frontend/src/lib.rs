use seed::{prelude::*, virtual_dom::AtValue, *};
use serde::Deserialize;
use serde_wasm_bindgen::to_value;
use shared::{
    Extent, LocationForm, MapSurface, MoveDirection, Planner, PlannerError, ProjectedPoint,
    RouteRequest, RouteResponse, Waypoint, WaypointId,
};
use wasm_bindgen::{
    JsCast,
    prelude::{JsValue, wasm_bindgen},
};

#[wasm_bindgen(module = "/openlayers_map.js")]
extern "C" {
    #[wasm_bindgen(js_name = initMap)]
    fn init_map();
    #[wasm_bindgen(js_name = drawPoints)]
    fn draw_points_js(points: JsValue);
    #[wasm_bindgen(js_name = drawRoute)]
    fn draw_route_js(coords: JsValue);
    #[wasm_bindgen(js_name = fitExtent)]
    fn fit_extent_js(extent: JsValue);
}

fn api_root() -> String {
    if let Some(url) = option_env!("FRONTEND_API_ROOT") {
        return url.trim_end_matches('/').to_string();
    }
    "http://localhost:8080/api/route".to_string()
}

/// Forwards draw calls to the OpenLayers module.
pub struct OlMapSurface;

impl MapSurface for OlMapSurface {
    fn draw_points(&mut self, points: &[ProjectedPoint]) {
        match to_value(points) {
            Ok(value) => draw_points_js(value),
            Err(err) => console_error(&format!("cannot encode markers: {err}")),
        }
    }

    fn draw_route(&mut self, geometry: &[ProjectedPoint]) {
        match to_value(geometry) {
            Ok(value) => draw_route_js(value),
            Err(err) => console_error(&format!("cannot encode route: {err}")),
        }
    }

    fn fit_extent(&mut self, extent: Extent) {
        match to_value(&extent) {
            Ok(value) => fit_extent_js(value),
            Err(err) => console_error(&format!("cannot encode extent: {err}")),
        }
    }
}

pub struct Model {
    planner: Planner<OlMapSurface>,
    form: LocationForm,
    pending: bool,
    error: Option<String>,
}

pub enum Msg {
    NameChanged(String),
    LongitudeChanged(String),
    LatitudeChanged(String),
    AddLocation,
    MapClicked { x: f64, y: f64 },
    Rename(WaypointId, String),
    Move(WaypointId, MoveDirection),
    Delete(WaypointId),
    ToggleSelection(WaypointId),
    CalculateRoute,
    RouteFetched(Result<RouteResponse, String>),
}

pub fn init(_: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders.stream(streams::window_event(Ev::from("map-click"), |event| {
        let payload = event
            .dyn_into::<web_sys::CustomEvent>()
            .ok()
            .and_then(|event| {
                serde_wasm_bindgen::from_value::<MapClickPayload>(event.detail()).ok()
            });
        match payload {
            Some(MapClickPayload { x, y }) => Some(Msg::MapClicked { x, y }),
            None => {
                console_error("[frontend] ignoring malformed map-click event");
                None
            }
        }
    }));

    Model {
        planner: Planner::new(OlMapSurface),
        form: LocationForm::default(),
        pending: false,
        error: None,
    }
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::NameChanged(val) => model.form.name = val,
        Msg::LongitudeChanged(val) => model.form.longitude = val,
        Msg::LatitudeChanged(val) => model.form.latitude = val,
        Msg::AddLocation => {
            if let Err(err) = model.planner.submit_form(&mut model.form) {
                alert(&err);
            }
        }
        Msg::MapClicked { x, y } => {
            let id = model.planner.handle_map_click(ProjectedPoint { x, y });
            web_sys::console::debug_1(&format!("[frontend] map click added {id}").into());
        }
        Msg::Rename(id, name) => model.planner.rename(id, name),
        Msg::Move(id, direction) => model.planner.move_waypoint(id, direction),
        Msg::Delete(id) => model.planner.delete(id),
        Msg::ToggleSelection(id) => model.planner.toggle_selection(id),
        Msg::CalculateRoute => {
            // One request at a time; clicks while waiting are dropped.
            if model.pending {
                return;
            }
            match model.planner.route_endpoints() {
                Ok(endpoints) => {
                    model.pending = true;
                    model.error = None;
                    orders.perform_cmd(send_route_request(endpoints.into()));
                }
                Err(err) => alert(&err),
            }
        }
        Msg::RouteFetched(result) => {
            model.pending = false;
            let result = result.map(|route| route.path);
            model.error = match model.planner.apply_route(result) {
                Ok(()) => None,
                Err(PlannerError::DegenerateGeometry(_)) => None,
                Err(err) => Some(err.to_string()),
            };
        }
    }
}

async fn send_route_request(payload: RouteRequest) -> Msg {
    web_sys::console::debug_1(
        &format!(
            "[frontend] sending route request start=({:.5},{:.5}) end=({:.5},{:.5})",
            payload.start.lon, payload.start.lat, payload.end.lon, payload.end.lat
        )
        .into(),
    );
    let response = match Request::new(api_root()).method(Method::Post).json(&payload) {
        Err(err) => Err(format!("{err:?}")),
        Ok(request) => match request.fetch().await {
            Err(err) => Err(format!("{err:?}")),
            Ok(raw) => match raw.check_status() {
                Err(status_err) => Err(format!("{status_err:?}")),
                Ok(resp) => match resp.json::<RouteResponse>().await {
                    Ok(route) => Ok(route),
                    Err(err) => Err(format!("{err:?}")),
                },
            },
        },
    };

    Msg::RouteFetched(response)
}

pub fn view(model: &Model) -> Node<Msg> {
    div![
        C!["App"],
        view_form(&model.form),
        view_locations(model),
        button![
            C!["button", "calculate-route"],
            if model.pending { "Calculating…" } else { "Calculate Route" },
            attrs! { At::Disabled => bool_attr(model.pending) },
            ev(Ev::Click, |_| Msg::CalculateRoute),
        ],
        if let Some(error) = &model.error {
            p![C!["error"], error]
        } else {
            empty![]
        }
    ]
}

fn view_form(form: &LocationForm) -> Node<Msg> {
    let input_field = |name: &str, placeholder: &str, value: &str, msg: fn(String) -> Msg| {
        input![
            attrs! {
                At::Name => name,
                At::Type => "text",
                At::Placeholder => placeholder,
                At::Value => value,
                At::Required => AtValue::None,
                At::AutoComplete => "off",
            },
            input_ev(Ev::Input, msg),
        ]
    };

    form![
        C!["coordinate-form"],
        ev(Ev::Submit, |event| {
            event.prevent_default();
            Msg::AddLocation
        }),
        input_field("name", "Location name", &form.name, Msg::NameChanged),
        input_field("longitude", "Longitude", &form.longitude, Msg::LongitudeChanged),
        input_field("latitude", "Latitude", &form.latitude, Msg::LatitudeChanged),
        button![C!["button"], attrs! { At::Type => "submit" }, "Add Location"],
    ]
}

fn view_locations(model: &Model) -> Node<Msg> {
    let store = model.planner.store();
    ul![
        C!["location-list"],
        model
            .planner
            .waypoints()
            .iter()
            .map(|waypoint| view_location(waypoint, store.is_selected(waypoint.id)))
    ]
}

fn view_location(waypoint: &Waypoint, selected: bool) -> Node<Msg> {
    let id = waypoint.id;
    li![
        el_key(&id.to_string()),
        input![
            attrs! {
                At::Type => "checkbox",
                At::Checked => bool_attr(selected),
            },
            ev(Ev::Change, move |_| Msg::ToggleSelection(id)),
        ],
        input![
            attrs! { At::Type => "text", At::Value => waypoint.name.as_str() },
            input_ev(Ev::Input, move |name| Msg::Rename(id, name)),
        ],
        span![location_label(waypoint)],
        div![
            button!["Up", ev(Ev::Click, move |_| Msg::Move(id, MoveDirection::Up))],
            button!["Down", ev(Ev::Click, move |_| Msg::Move(id, MoveDirection::Down))],
            button![
                C!["delete"],
                "Delete",
                ev(Ev::Click, move |_| Msg::Delete(id))
            ],
        ],
    ]
}

fn location_label(waypoint: &Waypoint) -> String {
    format!(
        "Lon: {}, Lat: {}",
        waypoint.display_lon(),
        waypoint.display_lat()
    )
}

#[wasm_bindgen(start)]
pub fn start() {
    init_map();
    App::start("app", init, update, view);
}

fn alert(err: &PlannerError) {
    if let Err(js_err) = window().alert_with_message(&err.to_string()) {
        console_error(&format!("alert failed: {js_err:?}"));
    }
}

fn console_error(message: &str) {
    web_sys::console::error_1(&message.into());
}

fn bool_attr(value: bool) -> AtValue {
    if value {
        AtValue::Some("true".into())
    } else {
        AtValue::Ignored
    }
}

#[derive(Deserialize)]
struct MapClickPayload {
    x: f64,
    y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_label_uses_five_decimals() {
        let waypoint = Waypoint {
            id: WaypointId::new(),
            name: "A".into(),
            lon: 10.123456,
            lat: -20.5,
        };
        assert_eq!(location_label(&waypoint), "Lon: 10.12346, Lat: -20.50000");
    }

    #[test]
    fn test_api_root_has_no_trailing_slash() {
        assert!(!api_root().ends_with('/'));
    }

    #[test]
    fn test_map_click_payload_shape() {
        let payload: MapClickPayload =
            serde_json::from_str(r#"{"x": -13625505.67, "y": 4551210.92}"#).unwrap();
        assert_eq!(payload.x, -13625505.67);
        assert_eq!(payload.y, 4551210.92);
    }

    #[test]
    fn test_insufficient_selection_alert_text() {
        let err = PlannerError::InsufficientSelection { selected: 1 };
        assert_eq!(err.to_string(), "Please select at least two locations.");
    }
}
