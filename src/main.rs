//! Demo host: a small mindmap view wired to the toolbar shell.
//!
//! Run with no arguments for the interactive demo; `--init-config` writes
//! a commented default config file and exits. `/` focuses the search
//! field, `q` or Ctrl-C quits, the mouse activates toolbar buttons, the
//! clear affordance, and the settings gear.

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use tracing::info;

use mindbar::config::Config;
use mindbar::utils::logging;
use mindbar::{
    command_handler, overlay, search_handler, Container, MindmapView, Position, ToolbarCallbacks,
    ToolbarShell, ViewOptions,
};

/// One node of the demo map.
struct Node {
    depth: usize,
    label: &'static str,
}

/// A toy mindmap implementing the collaborator seam.
struct DemoMindmap {
    nodes: Vec<Node>,
    zoom: f32,
    expanded: bool,
    filter: String,
    options: ViewOptions,
    status: String,
}

impl DemoMindmap {
    fn new() -> Self {
        let nodes = vec![
            Node { depth: 0, label: "mindbar" },
            Node { depth: 1, label: "toolbar shell" },
            Node { depth: 2, label: "item registry" },
            Node { depth: 2, label: "overlays" },
            Node { depth: 1, label: "search input" },
            Node { depth: 2, label: "debouncer" },
            Node { depth: 2, label: "clear affordance" },
            Node { depth: 1, label: "configuration" },
            Node { depth: 2, label: "toml file" },
        ];
        Self {
            nodes,
            zoom: 1.0,
            expanded: true,
            filter: String::new(),
            options: ViewOptions::default(),
            status: "ready".to_string(),
        }
    }

    fn set_filter(&mut self, query: &str) {
        self.filter = query.to_string();
        self.status = if query.is_empty() {
            "filter cleared".to_string()
        } else {
            format!("filtering: {query}")
        };
    }
}

impl MindmapView for DemoMindmap {
    fn rescale(&mut self) {
        // zero-argument rescale steps through zoom levels
        self.zoom = if self.zoom >= 2.0 { 0.5 } else { self.zoom + 0.25 };
        self.status = format!("zoom {:.2}x", self.zoom);
    }

    fn fit(&mut self) {
        self.zoom = 1.0;
        self.status = "fit to view".to_string();
    }

    fn expand_all(&mut self) {
        self.expanded = true;
        self.status = "expanded all".to_string();
    }

    fn collapse_all(&mut self) {
        self.expanded = false;
        self.status = "collapsed all".to_string();
    }

    fn set_options(&mut self, options: ViewOptions) {
        self.status = format!("color scheme: {}", options.color_scheme);
        self.options = options;
    }
}

fn render_map(f: &mut Frame, area: Rect, map: &DemoMindmap) {
    let filter = map.filter.to_lowercase();
    let lines: Vec<Line> = map
        .nodes
        .iter()
        .filter(|node| map.expanded || node.depth == 0)
        .filter(|node| filter.is_empty() || node.label.to_lowercase().contains(&filter))
        .map(|node| {
            let style = if node.depth == 0 {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::raw("  ".repeat(node.depth + 1)),
                Span::styled(node.label, style),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} · zoom {:.2}x ", map.status, map.zoom));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn run(config: Config) -> Result<()> {
    let map = Rc::new(RefCell::new(DemoMindmap::new()));
    let collaborator: Rc<RefCell<dyn MindmapView>> = map.clone();

    let search_map = Rc::clone(&map);
    let settings_map = Rc::clone(&map);
    let export_map = Rc::clone(&map);
    let color_map = Rc::clone(&map);
    let callbacks = ToolbarCallbacks {
        on_search: Some(search_handler(move |query| {
            search_map.borrow_mut().set_filter(query)
        })),
        on_settings: Some(command_handler(move || {
            settings_map.borrow_mut().status = "settings opened".to_string();
        })),
        on_export: Some(command_handler(move || {
            export_map.borrow_mut().status = "exported".to_string();
        })),
        on_color_scheme_change: Some(command_handler(move || {
            let mut map = color_map.borrow_mut();
            let next = if map.options.color_scheme == "default" {
                "dark"
            } else {
                "default"
            };
            map.set_options(ViewOptions {
                color_scheme: next.to_string(),
                ..ViewOptions::default()
            });
        })),
        ..Default::default()
    };

    let mut shell = ToolbarShell::create(collaborator, config.toolbar, callbacks)
        .with_search_config(config.search);
    let container = Container::new("main");
    shell.attach_to_container(&container);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut shell, &map);

    disable_raw_mode()?;
    let _ = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    );
    let _ = terminal.show_cursor();
    shell.destroy();

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    shell: &mut ToolbarShell,
    map: &Rc<RefCell<DemoMindmap>>,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let screen = f.area();
            let bar_y = match shell.position() {
                Position::Top => screen.y,
                Position::Bottom => screen.bottom().saturating_sub(1),
            };
            // keep the bar clear of the settings trigger at the top right
            let bar_width = match shell.position() {
                Position::Top => screen.width.saturating_sub(4),
                Position::Bottom => screen.width,
            };
            let bar_area = Rect::new(screen.x, bar_y, bar_width, shell.height());

            let map_y = match shell.position() {
                Position::Top => screen.y + 1,
                Position::Bottom => screen.y,
            };
            let map_area = Rect::new(
                screen.x,
                map_y,
                screen.width,
                screen.height.saturating_sub(2),
            );

            render_map(f, map_area, &map.borrow());
            shell.render(f, bar_area);
            overlay::render(f, screen);
        })?;

        // pump the search debounce between input events
        shell.tick();

        if event::poll(std::time::Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    // key release events double-trigger on Windows
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        break;
                    }
                    if shell.search().is_focused() {
                        let was_escape = key.code == KeyCode::Esc;
                        shell.handle_key(key);
                        if was_escape {
                            shell.search_mut().blur();
                        }
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') => break,
                        KeyCode::Char('/') => shell.search_mut().focus(),
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => {
                    shell.handle_mouse(mouse);
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--init-config") {
        let path = Config::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, Config::default_with_comments())?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    let log_path = logging::init_tracing()?;
    info!(target: "toolbar", "mindbar demo starting");

    let config = Config::load()?;
    run(config)?;

    println!("Log written to {}", log_path.display());
    Ok(())
}
