/// Count EIGRP adjacencies in a capture, the way an operations script would
use anneal::{count_eigrp_neighbors, eigrp_peers, normalize_document, uptime};
use serde_json::Value;

fn main() -> anyhow::Result<()> {
    println!("=== Counting EIGRP neighbors ===\n");

    // `show ip eigrp neighbors | json` from a switch running two processes.
    // Note the mixed cardinality: multi-row tables are lists, one-row
    // tables are bare objects. Normalization erases the difference before
    // anything counts.
    let capture = r#"{
        "TABLE_asn": {
            "ROW_asn": [
                {
                    "asn": "65001",
                    "TABLE_vrf": {
                        "ROW_vrf": [
                            {
                                "vrf": "default",
                                "TABLE_peer": {
                                    "ROW_peer": [
                                        {
                                            "peer_ipaddr": "10.1.1.2",
                                            "peer_ifname": "Eth1/1",
                                            "peer_uptime": "P14DT19H11M58S"
                                        },
                                        {
                                            "peer_ipaddr": "10.1.1.6",
                                            "peer_ifname": "Eth1/2",
                                            "peer_uptime": "PT45M12S"
                                        }
                                    ]
                                }
                            },
                            {
                                "vrf": "management",
                                "TABLE_peer": {
                                    "ROW_peer": {
                                        "peer_ipaddr": "192.168.10.2",
                                        "peer_ifname": "mgmt0",
                                        "peer_uptime": "P2DT1H3M9S"
                                    }
                                }
                            }
                        ]
                    }
                },
                {
                    "asn": "65002",
                    "TABLE_vrf": {
                        "ROW_vrf": {
                            "vrf": "prod",
                            "TABLE_peer": {
                                "ROW_peer": {
                                    "peer_ipaddr": "172.16.0.9",
                                    "peer_ifname": "Po10",
                                    "peer_uptime": "PT3H2M1S"
                                }
                            }
                        }
                    }
                }
            ]
        }
    }"#;

    let doc = Value::Object(normalize_document(capture)?);

    println!(
        "This switch has {} EIGRP neighbors.",
        count_eigrp_neighbors(&doc)
    );

    for peer in eigrp_peers(&doc) {
        let addr = peer["peer_ipaddr"].as_str().unwrap_or("?");
        let intf = peer["peer_ifname"].as_str().unwrap_or("?");
        match peer["peer_uptime"].as_str().and_then(uptime::parse) {
            Some(up) => println!("  {} on {} (up {})", addr, intf, uptime::brief(up)),
            None => println!("  {} on {}", addr, intf),
        }
    }

    Ok(())
}
