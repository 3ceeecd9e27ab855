use std::net::IpAddr;
use std::net::Ipv4Addr;
use std::net::Ipv6Addr;
use std::net::SocketAddr;

use once_cell::sync::Lazy;

/// Faixas IPv4 privadas/reservadas consultadas por `is_local_ip`,
/// como pares (rede, bits de prefixo).
static LOCAL_NETWORKS: Lazy<Vec<(Ipv4Addr, u32)>> = Lazy::new(|| {
    vec![
        (Ipv4Addr::new(10, 0, 0, 0), 8),
        (Ipv4Addr::new(172, 16, 0, 0), 12),
        (Ipv4Addr::new(192, 168, 0, 0), 16),
        (Ipv4Addr::new(169, 254, 0, 0), 16), // link-local
        (Ipv4Addr::new(100, 64, 0, 0), 10),  // carrier-grade NAT
    ]
});

fn v4_in_network(ip: Ipv4Addr, network: Ipv4Addr, prefix: u32) -> bool
{
    let mask = u32::MAX << (32 - prefix);
    (u32::from(ip) & mask) == (u32::from(network) & mask)
}

fn is_local_v6(ip: Ipv6Addr) -> bool
{
    let first = ip.segments()[0];
    // fc00::/7 (unique-local) e fe80::/10 (link-local)
    (first & 0xfe00) == 0xfc00 || (first & 0xffc0) == 0xfe80
}

/// Diz se o endereço pertence a uma rede interna (ou é loopback).
pub fn is_local_ip(ip: IpAddr) -> bool
{
    match ip
    {
        IpAddr::V4(v4) =>
        {
            LOCAL_NETWORKS.iter().any(|(network, prefix)| v4_in_network(v4, *network, *prefix))
                || v4.is_loopback()
        },
        IpAddr::V6(v6) => is_local_v6(v6) || v6.is_loopback(),
    }
}

/// Versão de `is_local_ip` que parte da representação textual.
/// Texto que não é um IP válido conta como "não interno".
pub fn has_local_ip_addr(value: &str) -> bool
{
    match value.trim().parse::<IpAddr>()
    {
        Ok(ip) => is_local_ip(ip),
        Err(_) => false,
    }
}

/// Extrai o IP do endereço remoto da conexão (`host:porta` ou IP puro).
pub fn remote_ip(remote_addr: &str) -> Option<IpAddr>
{
    let trimmed = remote_addr.trim();

    if let Ok(addr) = trimmed.parse::<SocketAddr>()
    {
        return Some(addr.ip());
    }

    trimmed.parse::<IpAddr>().ok()
}

/// Melhor esforço para obter o IP público do cliente atrás de proxy reverso
/// (nginx ou haproxy). Percorre o `X-Forwarded-For` da esquerda para a
/// direita ignorando entradas vazias e endereços internos, depois tenta o
/// `X-Real-Ip` e por fim o endereço remoto da conexão, com o mesmo filtro.
pub fn client_public_ip(
    forwarded_for: Option<&str>,
    real_ip: Option<&str>,
    remote_addr: &str,
) -> Option<IpAddr>
{
    if let Some(header) = forwarded_for
    {
        for entry in header.split(',')
        {
            let entry = entry.trim();
            if let Ok(ip) = entry.parse::<IpAddr>()
            {
                if !is_local_ip(ip)
                {
                    return Some(ip);
                }
            }
        }
    }

    if let Some(header) = real_ip
    {
        if let Ok(ip) = header.trim().parse::<IpAddr>()
        {
            if !is_local_ip(ip)
            {
                return Some(ip);
            }
        }
    }

    match remote_ip(remote_addr)
    {
        Some(ip) if !is_local_ip(ip) => Some(ip),
        _ => None,
    }
}

/// Primeiro IP interpretável na mesma ordem de precedência de
/// `client_public_ip`, sem filtrar endereços internos.
pub fn client_ip(
    forwarded_for: Option<&str>,
    real_ip: Option<&str>,
    remote_addr: &str,
) -> Option<IpAddr>
{
    if let Some(header) = forwarded_for
    {
        for entry in header.split(',')
        {
            if let Ok(ip) = entry.trim().parse::<IpAddr>()
            {
                return Some(ip);
            }
        }
    }

    if let Some(header) = real_ip
    {
        if let Ok(ip) = header.trim().parse::<IpAddr>()
        {
            return Some(ip);
        }
    }

    remote_ip(remote_addr)
}
