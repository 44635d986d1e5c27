use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct AppTheme {
    // General
    pub primary_background: Color,
    pub primary_foreground: Color,
    pub secondary_foreground: Color,
    pub tertiary_foreground: Color,
    pub border_primary: Color,
    pub border_focused: Color,
    pub border_accent: Color,
    pub highlight_style: Style, // Selected table row
    pub error_text: Color,
    pub warning_text: Color,
    pub success_text: Color,
    pub info_text: Color,
    pub title: Style,

    // Status Bar
    pub status_bar_background: Color,
    pub status_bar_foreground: Color,
    pub status_bar_mode_normal_bg: Color,
    pub status_bar_mode_confirm_bg: Color,
    pub status_bar_mode_goto_bg: Color,
    pub status_bar_route_fg: Color,

    // Inputs
    pub input_background: Color,
    pub input_text: Color,
    pub input_active: Style,
    pub input_placeholder: Style,

    // Product Table
    pub table_header: Style,
    pub sort_active: Style,
    pub sort_inactive: Style,
    pub price_text: Style,
    pub pagination_text: Style,

    // Price Lookup
    pub lookup_price: Style,

    // Toasts
    pub toast_success: Color,
    pub toast_error: Color,
    pub toast_info: Color,

    // Log View
    pub log_title: Style,
    pub log_level_trace: Style,
    pub log_level_debug: Style,
    pub log_level_info: Style,
    pub log_level_warn: Style,
    pub log_level_error: Style,
    pub log_timestamp: Style,
    pub log_target: Style,

    // Popup
    pub popup_border: Color,
    pub popup_background: Color,
    pub help_text: Color,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            // General
            primary_background: Color::Reset, // Terminal default
            primary_foreground: Color::White,
            secondary_foreground: Color::Gray,
            tertiary_foreground: Color::DarkGray,
            border_primary: Color::DarkGray,
            border_focused: Color::LightCyan,
            border_accent: Color::Cyan,
            highlight_style: Style::default().add_modifier(Modifier::REVERSED),
            error_text: Color::Red,
            warning_text: Color::Yellow,
            success_text: Color::Green,
            info_text: Color::Cyan,
            title: Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),

            // Status Bar
            status_bar_background: Color::Blue,
            status_bar_foreground: Color::White,
            status_bar_mode_normal_bg: Color::LightCyan,
            status_bar_mode_confirm_bg: Color::LightRed,
            status_bar_mode_goto_bg: Color::LightMagenta,
            status_bar_route_fg: Color::Yellow,

            // Inputs
            input_background: Color::Reset,
            input_text: Color::Rgb(220, 220, 220),
            input_active: Style::default().fg(Color::LightCyan),
            input_placeholder: Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),

            // Product Table
            table_header: Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
            sort_active: Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
            sort_inactive: Style::default().fg(Color::DarkGray),
            price_text: Style::default().fg(Color::LightGreen),
            pagination_text: Style::default().fg(Color::Gray),

            // Price Lookup
            lookup_price: Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD),

            // Toasts
            toast_success: Color::Green,
            toast_error: Color::Red,
            toast_info: Color::Cyan,

            // Log View
            log_title: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            log_level_trace: Style::default().fg(Color::Magenta),
            log_level_debug: Style::default().fg(Color::Blue),
            log_level_info: Style::default().fg(Color::Green),
            log_level_warn: Style::default().fg(Color::Yellow),
            log_level_error: Style::default().fg(Color::Red),
            log_timestamp: Style::default().fg(Color::DarkGray),
            log_target: Style::default().fg(Color::Cyan),

            // Popup
            popup_border: Color::Yellow,
            popup_background: Color::Black,
            help_text: Color::Gray,
        }
    }
}
