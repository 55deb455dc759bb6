use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, trace, warn};
use tracing_subscriber::EnvFilter;

use pixelnode_core::protocol::layout::{ARTNET_PORT, ARTNET_UNICAST_PORT};
use pixelnode_core::{Datagram, DmxSink, Node, NodeConfig, NodeIdentity, Transport, resolve};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("PIXELNODE_BUILD_COMMIT"),
    " ",
    env!("PIXELNODE_BUILD_DATE"),
    ")"
);

const DEFAULT_MAC: &str = "70:69:69:2d:30:31";

/// How long the node may go without valid Art-Net traffic before the
/// watchdog starts complaining.
const SILENCE_WINDOW: Duration = Duration::from_secs(30);

#[derive(Parser, Debug)]
#[command(name = "pixelnode")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Art-Net node for a single DMX universe driving a pixel strip.",
    long_about = None,
    after_help = "Examples:\n  pixelnode run --ip 192.168.1.200 --netmask 255.255.255.0\n  pixelnode resolve --ip 10.0.1.37 --netmask 255.255.255.0"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the node: answer discovery and feed DMX output to the pixel strip.
    Run {
        /// IPv4 address acquired for this node by the network layer
        #[arg(long)]
        ip: Ipv4Addr,

        /// Subnet mask; the port address is derived from the host part
        #[arg(long)]
        netmask: Ipv4Addr,

        /// MAC address advertised in discovery replies
        #[arg(long, default_value = DEFAULT_MAC)]
        mac: String,

        /// Local address to bind the Art-Net sockets on
        #[arg(long, default_value = "0.0.0.0")]
        bind: Ipv4Addr,
    },

    /// Print the port address and reply delay derived from an IP/netmask pair.
    Resolve {
        #[arg(long)]
        ip: Ipv4Addr,

        #[arg(long)]
        netmask: Ipv4Addr,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            ip,
            netmask,
            mac,
            bind,
        } => cmd_run(ip, netmask, &mac, bind),
        Commands::Resolve { ip, netmask } => cmd_resolve(ip, netmask),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_run(ip: Ipv4Addr, netmask: Ipv4Addr, mac: &str, bind: Ipv4Addr) -> Result<(), CliError> {
    let mac = parse_mac(mac)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let identity = NodeIdentity {
        ip,
        mac,
        dhcp_assigned: false,
    };
    let config = NodeConfig::default();
    let mut transport = UdpTransport::bind(bind)?;
    let mut pixels = PixelBuffer::new(config.max_channels);
    let mut watchdog = SilenceWatchdog::new(SILENCE_WINDOW);
    let mut node = Node::new(identity, netmask, config);

    info!(
        "listening on {}:{} (out-of-band {}), port address {}",
        bind,
        ARTNET_PORT,
        ARTNET_UNICAST_PORT,
        node.port_address().raw()
    );
    node.announce(&mut transport);

    let mut buf = [0u8; 1024];
    loop {
        let now = Instant::now();

        for local_port in [ARTNET_PORT, ARTNET_UNICAST_PORT] {
            if let Some((len, source)) = transport.try_recv(local_port, &mut buf) {
                let datagram = Datagram {
                    source,
                    dest_port: local_port,
                    data: &buf[..len],
                };
                node.handle_datagram(datagram, now, &mut transport, &mut pixels);
            }
        }

        node.tick(now, &mut transport);
        pixels.refresh(now);
        watchdog.check(node.time_since_valid(now), now);

        thread::sleep(Duration::from_millis(1));
    }
}

fn cmd_resolve(ip: Ipv4Addr, netmask: Ipv4Addr) -> Result<(), CliError> {
    let resolved = resolve(ip, netmask);
    let port_address = resolved.port_address;
    println!(
        "port address: {} (net {}, sub-net {}, universe {})",
        port_address.raw(),
        port_address.net(),
        port_address.sub_net(),
        port_address.universe()
    );
    println!("reply delay: {} ms", resolved.reply_delay.as_millis());
    Ok(())
}

/// UDP send/receive on the canonical and out-of-band Art-Net ports. Receive
/// is non-blocking; transmit failures are logged and dropped, the node never
/// sees them.
struct UdpTransport {
    canonical: UdpSocket,
    unicast: UdpSocket,
}

impl UdpTransport {
    fn bind(bind: Ipv4Addr) -> anyhow::Result<Self> {
        let canonical = UdpSocket::bind(SocketAddrV4::new(bind, ARTNET_PORT))
            .with_context(|| format!("binding {bind}:{ARTNET_PORT}"))?;
        let unicast = UdpSocket::bind(SocketAddrV4::new(bind, ARTNET_UNICAST_PORT))
            .with_context(|| format!("binding {bind}:{ARTNET_UNICAST_PORT}"))?;
        for socket in [&canonical, &unicast] {
            socket
                .set_nonblocking(true)
                .context("setting socket non-blocking")?;
            socket.set_broadcast(true).context("enabling broadcast")?;
        }
        Ok(Self { canonical, unicast })
    }

    /// One queued datagram from the socket bound to `local_port`, if any.
    fn try_recv(&self, local_port: u16, buf: &mut [u8]) -> Option<(usize, Ipv4Addr)> {
        match self.socket_for(local_port).recv_from(buf) {
            Ok((len, SocketAddr::V4(src))) => Some((len, *src.ip())),
            Ok((_, SocketAddr::V6(_))) => None,
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => None,
            Err(err) => {
                warn!("receive on port {} failed: {}", local_port, err);
                None
            }
        }
    }

    fn socket_for(&self, port: u16) -> &UdpSocket {
        if port == ARTNET_UNICAST_PORT {
            &self.unicast
        } else {
            &self.canonical
        }
    }
}

impl Transport for UdpTransport {
    fn transmit(&mut self, data: &[u8], source_port: u16, dest: Ipv4Addr, dest_port: u16) {
        let target = SocketAddrV4::new(dest, dest_port);
        if let Err(err) = self.socket_for(source_port).send_to(data, target) {
            warn!("transmit of {} bytes to {} failed: {}", data.len(), target, err);
        }
    }
}

/// Stand-in for the LED strip driver: keeps the last applied frame and
/// re-drives it once per second even without traffic.
struct PixelBuffer {
    channels: Vec<u8>,
    lit: usize,
    last_show: Instant,
}

impl PixelBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            channels: vec![0; capacity],
            lit: 0,
            last_show: Instant::now(),
        }
    }

    fn refresh(&mut self, now: Instant) {
        if now.saturating_duration_since(self.last_show) >= Duration::from_secs(1) {
            self.show(now);
        }
    }

    fn show(&mut self, now: Instant) {
        trace!(
            "strip refresh, {} of {} channels lit",
            self.lit,
            self.channels.len()
        );
        self.last_show = now;
    }
}

impl DmxSink for PixelBuffer {
    fn on_channel_data(&mut self, channels: &[u8]) {
        let take = channels.len().min(self.channels.len());
        self.channels[..take].copy_from_slice(&channels[..take]);
        self.lit = take;
        self.show(Instant::now());
    }
}

/// Host-side stand-in for the hardware watchdog: it only warns. On the
/// device the watchdog stops being fed and resets the node instead.
struct SilenceWatchdog {
    window: Duration,
    last_warn: Option<Instant>,
}

impl SilenceWatchdog {
    fn new(window: Duration) -> Self {
        Self {
            window,
            last_warn: None,
        }
    }

    fn check(&mut self, silence: Option<Duration>, now: Instant) {
        let Some(silence) = silence else { return };
        if silence < self.window {
            self.last_warn = None;
            return;
        }
        let due = self
            .last_warn
            .is_none_or(|at| now.saturating_duration_since(at) >= self.window);
        if due {
            warn!("no valid Art-Net traffic for {:?}", silence);
            self.last_warn = Some(now);
        }
    }
}

fn parse_mac(raw: &str) -> Result<[u8; 6], CliError> {
    let invalid = || {
        CliError::new(
            format!("invalid MAC address '{raw}'"),
            Some(format!(
                "expected six colon-separated hex octets, e.g. {DEFAULT_MAC}"
            )),
        )
    };

    let octets: Vec<&str> = raw.split(':').collect();
    if octets.len() != 6 {
        return Err(invalid());
    }
    let mut mac = [0u8; 6];
    for (slot, octet) in mac.iter_mut().zip(octets) {
        *slot = u8::from_str_radix(octet, 16).map_err(|_| invalid())?;
    }
    Ok(mac)
}
