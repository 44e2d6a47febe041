//! Every user-visible string in one place.

pub struct UiText {
    // Window / side panel
    pub window_title: &'static str,
    pub app_title: &'static str,
    pub welcome_text: &'static str,
    pub user_inputs_heading: &'static str,
    pub ticker_selector_heading: &'static str,
    pub horizon_slider_heading: &'static str,
    pub horizon_slider_suffix: &'static str,

    // Central panel sections, in render order
    pub raw_data_heading: &'static str,
    pub raw_chart_heading: &'static str,
    pub stats_heading: &'static str,
    pub forecast_data_heading: &'static str,
    pub forecast_plot_prefix: &'static str,
    pub forecast_plot_suffix: &'static str,
    pub components_heading: &'static str,
    pub daily_change_heading: &'static str,
    pub historical_chart_heading: &'static str,

    // Statistics labels
    pub stats_company: &'static str,
    pub stats_ticker: &'static str,
    pub stats_market_cap: &'static str,
    pub stats_52w_high: &'static str,
    pub stats_52w_low: &'static str,

    // Chart series
    pub series_open: &'static str,
    pub series_close: &'static str,
    pub series_actual: &'static str,
    pub series_estimate: &'static str,
    pub series_band: &'static str,
    pub series_trend: &'static str,
    pub series_trend_band: &'static str,
    pub series_weekly: &'static str,
    pub series_yearly: &'static str,
    pub series_horizon: &'static str,
    pub series_close_price: &'static str,
    pub plot_x_axis: &'static str,
    pub plot_y_axis: &'static str,
    pub range_start_label: &'static str,
    pub range_end_label: &'static str,
    pub seasonality_disabled: &'static str,

    // Status
    pub loading: &'static str,
    pub loading_done: &'static str,
    pub last_run_prefix: &'static str,
    pub model_reused_note: &'static str,
    pub error_heading: &'static str,
    pub error_hint: &'static str,
    pub missing_value: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    window_title: "Stock Forecast App",
    app_title: "📈 Stock Forecast App",
    welcome_text: "Welcome to the Stock Forecast App. Select a stock from the dropdown menu and choose the number of years to predict. The app will provide historical data and forecast future stock prices using an additive trend and seasonality model.",
    user_inputs_heading: "User Inputs",
    ticker_selector_heading: "Select Stock",
    horizon_slider_heading: "Years of Prediction:",
    horizon_slider_suffix: " yr",

    raw_data_heading: "Raw Data",
    raw_chart_heading: "Time Series Data with Rangeslider",
    stats_heading: "Stock Statistics",
    forecast_data_heading: "Forecast Data",
    forecast_plot_prefix: "Forecast plot for ",
    forecast_plot_suffix: " years",
    components_heading: "Forecast components",
    daily_change_heading: "Daily Price Change",
    historical_chart_heading: "Historical Closing Prices",

    stats_company: "Company Name",
    stats_ticker: "Stock Ticker",
    stats_market_cap: "Market Cap",
    stats_52w_high: "52-Week High",
    stats_52w_low: "52-Week Low",

    series_open: "Stock Open",
    series_close: "Stock Close",
    series_actual: "Actual",
    series_estimate: "Forecast",
    series_band: "Uncertainty",
    series_trend: "Trend",
    series_trend_band: "Trend uncertainty",
    series_weekly: "Weekly",
    series_yearly: "Yearly",
    series_horizon: "Forecast start",
    series_close_price: "Close Price",
    plot_x_axis: "Date",
    plot_y_axis: "Price",
    range_start_label: "From",
    range_end_label: "To",
    seasonality_disabled: "Not enough history for this seasonality",

    loading: "Loading data...",
    loading_done: "Loading data... done!",
    last_run_prefix: "Last run",
    model_reused_note: "(model reused)",
    error_heading: "⚠ Unable to Generate Forecast",
    error_hint: "Please check your ticker selection or network connection and try again.",
    missing_value: "n/a",
};
